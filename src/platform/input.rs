//! Keyboard and touch-zone input mapping

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Which directions are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionState {
    pub left: bool,
    pub right: bool,
}

impl DirectionState {
    /// Key pressed. Returns whether the key was one of ours.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Key released. Returns whether the key was one of ours.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        match Key::from_dom(key) {
            Some(Key::Left) => self.left = held,
            Some(Key::Right) => self.right = held,
            None => return false,
        }
        true
    }

    /// Touch began at `x` (relative to the canvas left edge): left half holds left
    pub fn touch_start(&mut self, x: f32, canvas_width: f32) {
        if x < canvas_width / 2.0 {
            self.left = true;
        } else {
            self.right = true;
        }
    }

    /// Touch lifted: release both directions
    pub fn touch_end(&mut self) {
        self.left = false;
        self.right = false;
    }

    pub fn to_tick_input(self) -> TickInput {
        TickInput::new(self.left, self.right)
    }
}

impl From<DirectionState> for TickInput {
    fn from(state: DirectionState) -> Self {
        state.to_tick_input()
    }
}
