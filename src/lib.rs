// ==================== Modules ====================
#[macro_use]
mod browser;
mod assets;
mod config;
mod context;
mod economy;
mod engine;
mod game;
mod hint;
mod minigame;
mod scene;
mod sprite;
mod ui;
mod zone;

use engine::GameLoop;
use game::Campus;
use wasm_bindgen::prelude::*;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs the panic hook
/// - starts the game loop, which loads config and textures before the
///   first frame
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Campus::new()).await {
            warn!("Could not start the game: {:#}", err);
        }
    });

    Ok(())
}
