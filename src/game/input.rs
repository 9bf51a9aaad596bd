//! Keyboard Input
//!
//! Key events are delivered by the host as they happen (including host
//! key-repeat), translated to [`Action`]s through the configured bindings,
//! and folded into [`Movement`]. The frame loop reads `Movement` once per
//! frame; jumps act on the player immediately.

use serde::{Deserialize, Serialize};

/// Physical keys that can be bound to actions.
///
/// A small, serializable subset of the host's key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    D,
    S,
    W,
    Left,
    Right,
    Up,
    Down,
    Space,
}

/// What a key does in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Right,
    Left,
    Jump,
    Forward,
    Backward,
}

/// A raw key transition from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// Key went down (or repeated while held)
    Down(Key),
    /// Key was released
    Up(Key),
}

/// Key lists per action.
///
/// Forward/backward are unbound by default: the depth axis is fixed and
/// enemies come straight at the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub right: Vec<Key>,
    pub left: Vec<Key>,
    pub jump: Vec<Key>,
    pub forward: Vec<Key>,
    pub backward: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            right: vec![Key::D, Key::Right],
            left: vec![Key::A, Key::Left],
            jump: vec![Key::Space],
            forward: Vec::new(),
            backward: Vec::new(),
        }
    }
}

impl KeyBindings {
    /// Resolve a key to its action. Earlier actions win if a key is bound twice.
    pub fn action_for(&self, key: Key) -> Option<Action> {
        let table: [(&[Key], Action); 5] = [
            (&self.right, Action::Right),
            (&self.left, Action::Left),
            (&self.jump, Action::Jump),
            (&self.forward, Action::Forward),
            (&self.backward, Action::Backward),
        ];
        table
            .iter()
            .find(|(keys, _)| keys.contains(&key))
            .map(|&(_, action)| action)
    }
}

/// Held-direction flags, toggled by key events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub forward: bool,
    pub backward: bool,
    pub right: bool,
    pub left: bool,
}

impl Movement {
    /// Set or clear the flag for a directional action. Returns false for
    /// non-directional actions.
    pub fn set(&mut self, action: Action, held: bool) -> bool {
        match action {
            Action::Right => self.right = held,
            Action::Left => self.left = held,
            Action::Forward => self.forward = held,
            Action::Backward => self.backward = held,
            Action::Jump => return false,
        }
        true
    }

    /// Horizontal (x, z) velocity for this frame.
    ///
    /// Fully re-derived from the flags; forward beats backward and right
    /// beats left when both are held.
    pub fn velocity(&self, speed: f32) -> (f32, f32) {
        let z = if self.forward {
            -speed
        } else if self.backward {
            speed
        } else {
            0.0
        };
        let x = if self.right {
            speed
        } else if self.left {
            -speed
        } else {
            0.0
        };
        (x, z)
    }
}
