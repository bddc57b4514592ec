//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas() {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .expect("test page has a document");
    if document.get_element_by_id("canvas").is_some() {
        return;
    }
    let canvas = document.create_element("canvas").expect("canvas element");
    canvas.set_id("canvas");
    document
        .body()
        .expect("test page has a body")
        .append_child(&canvas)
        .expect("canvas attached");
}

#[wasm_bindgen_test]
fn entry_point_starts_with_a_canvas_on_the_page() {
    mount_canvas();
    assert!(campus_walk::main_js().is_ok());
}
