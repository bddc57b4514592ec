use crate::browser;
use crate::engine::Point;
use anyhow::Result;
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::collections::HashSet;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent};

pub mod keys {
    pub const LEFT: &str = "ArrowLeft";
    pub const RIGHT: &str = "ArrowRight";
    pub const UP: &str = "ArrowUp";
    pub const DOWN: &str = "ArrowDown";
    pub const SPACE: &str = "Space";
}

/// Browser events as they come off the DOM callbacks
/// ┌──────────── Input Flow ─────────────────────────────────┐
/// │  DOM callback → channel → Input::process (once / frame) │
/// │  Input → Game::update (every fixed step)                │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    PointerDown(Point),
}

#[derive(Debug, Default, Clone)]
pub struct KeyState {
    pressed_keys: HashSet<String>,
}

impl KeyState {
    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed_keys.contains(code)
    }

    pub fn set_pressed(&mut self, code: &str) {
        self.pressed_keys.insert(code.to_string());
    }

    pub fn set_released(&mut self, code: &str) {
        self.pressed_keys.remove(code);
    }
}

#[derive(Debug, Default, Clone)]
pub struct Input {
    pub keys: KeyState,
    clicks: Vec<Point>,
}

impl Input {
    /// Drain everything the DOM delivered since the last animation frame
    pub fn process(&mut self, events: &mut UnboundedReceiver<InputEvent>) {
        // try_next : Ok(Some) event waiting, Ok(None) channel closed, Err empty
        while let Ok(Some(event)) = events.try_next() {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(code) => self.keys.set_pressed(&code),
            InputEvent::KeyUp(code) => self.keys.set_released(&code),
            InputEvent::PointerDown(point) => self.clicks.push(point),
        }
    }

    pub fn clicks(&self) -> &[Point] {
        &self.clicks
    }

    pub fn clear_clicks(&mut self) {
        self.clicks.clear();
    }
}

/// Hook keyboard and pointer listeners and hand back the receiving end
pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (sender, receiver) = unbounded();
    let keydown_sender = sender.clone();
    let keyup_sender = sender.clone();
    let pointer_sender = sender;

    let onkeydown = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keydown_sender, InputEvent::KeyDown(event.code()));
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let onkeyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
        send(&keyup_sender, InputEvent::KeyUp(event.code()));
    }) as Box<dyn FnMut(KeyboardEvent)>);

    // pointer events are mouse events, so offset_x/offset_y are available
    let onpointerdown = browser::closure_wrap(Box::new(move |event: MouseEvent| {
        send(
            &pointer_sender,
            InputEvent::PointerDown(Point {
                x: event.offset_x() as f32,
                y: event.offset_y() as f32,
            }),
        );
    }) as Box<dyn FnMut(MouseEvent)>);

    let window = browser::window()?;
    window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
    window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
    browser::canvas()?.set_onpointerdown(Some(onpointerdown.as_ref().unchecked_ref()));

    // listeners live for the lifetime of the page
    onkeydown.forget();
    onkeyup.forget();
    onpointerdown.forget();

    Ok(receiver)
}

fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
    let _ = sender.unbounded_send(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_state_tracks_press_and_release() {
        let mut input = Input::default();
        input.apply(InputEvent::KeyDown(keys::LEFT.to_string()));
        assert!(input.keys.is_pressed(keys::LEFT));
        input.apply(InputEvent::KeyUp(keys::LEFT.to_string()));
        assert!(!input.keys.is_pressed(keys::LEFT));
    }

    #[test]
    fn queued_events_are_drained_in_order() {
        let (sender, mut receiver) = unbounded();
        sender
            .unbounded_send(InputEvent::KeyDown(keys::UP.to_string()))
            .unwrap();
        sender
            .unbounded_send(InputEvent::PointerDown(Point { x: 4.0, y: 2.0 }))
            .unwrap();

        let mut input = Input::default();
        input.process(&mut receiver);
        assert!(input.keys.is_pressed(keys::UP));
        assert_eq!(input.clicks(), &[Point { x: 4.0, y: 2.0 }]);

        input.clear_clicks();
        assert!(input.clicks().is_empty());
    }
}
