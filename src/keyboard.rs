//! Raw keyboard hook
//!
//! macroquad's `is_key_pressed` swallows host key-repeat, but jumps must
//! re-trigger on every repeated key-down. This subscribes to the raw
//! miniquad event stream instead and hands the game plain [`KeyEvent`]s.

use macroquad::input::utils::{register_input_subscriber, repeat_all_miniquad_input};
use macroquad::miniquad::{EventHandler, KeyCode, KeyMods};
use crate::game::input::{Key, KeyEvent};

/// Map a host key code to a bindable key
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::A => Key::A,
        KeyCode::D => Key::D,
        KeyCode::S => Key::S,
        KeyCode::W => Key::W,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Space => Key::Space,
        _ => return None,
    })
}

/// Collects key transitions delivered since the last poll
pub struct KeyboardHook {
    subscriber: usize,
    pending: Vec<KeyEvent>,
}

impl KeyboardHook {
    pub fn new() -> Self {
        Self {
            subscriber: register_input_subscriber(),
            pending: Vec::new(),
        }
    }

    /// Drain key events received since the last call, in arrival order.
    pub fn poll(&mut self) -> Vec<KeyEvent> {
        let subscriber = self.subscriber;
        repeat_all_miniquad_input(self, subscriber);
        std::mem::take(&mut self.pending)
    }
}

impl EventHandler for KeyboardHook {
    fn update(&mut self) {}

    fn draw(&mut self) {}

    fn key_down_event(&mut self, keycode: KeyCode, _keymods: KeyMods, _repeat: bool) {
        if let Some(key) = key_from_code(keycode) {
            self.pending.push(KeyEvent::Down(key));
        }
    }

    fn key_up_event(&mut self, keycode: KeyCode, _keymods: KeyMods) {
        if let Some(key) = key_from_code(keycode) {
            self.pending.push(KeyEvent::Up(key));
        }
    }
}
