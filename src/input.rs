//! Input state normalized into movement intent
//!
//! Raw browser events are wired up by the driver; this module only keeps the
//! persistent state those events update and turns it into a `TickInput`.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_code(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Held arrow keys for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    #[default]
    Still,
    Up,
    Down,
    /// Both held; each step is still gated on its own edge
    Both,
}

impl Intent {
    pub fn wants_up(self) -> bool {
        matches!(self, Intent::Up | Intent::Both)
    }

    pub fn wants_down(self) -> bool {
        matches!(self, Intent::Down | Intent::Both)
    }
}

/// Held keys and the active touch point
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    /// Touch target in canvas pixels, `None` when no finger is down
    touch_y: Option<f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
        }
    }

    pub fn touch_start(&mut self, y: f32) {
        if y.is_finite() {
            self.touch_y = Some(y);
        }
    }

    /// Moves are only tracked while a touch is active
    pub fn touch_move(&mut self, y: f32) {
        if self.touch_y.is_some() && y.is_finite() {
            self.touch_y = Some(y);
        }
    }

    pub fn touch_end(&mut self) {
        self.touch_y = None;
    }

    pub fn intent(&self) -> Intent {
        match (self.up, self.down) {
            (true, false) => Intent::Up,
            (false, true) => Intent::Down,
            (true, true) => Intent::Both,
            (false, false) => Intent::Still,
        }
    }

    pub fn touch_target(&self) -> Option<f32> {
        self.touch_y
    }

    pub fn tick_input(&self) -> TickInput {
        TickInput {
            intent: self.intent(),
            touch_y: self.touch_y,
        }
    }

    /// Forget everything (restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Key::from_code("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_code("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_code("w"), None);
    }

    #[test]
    fn test_intent_from_keys() {
        let mut input = InputState::new();
        assert_eq!(input.intent(), Intent::Still);

        input.key_down(Key::Up);
        assert_eq!(input.intent(), Intent::Up);

        // Both held are kept apart, not cancelled here
        input.key_down(Key::Down);
        assert_eq!(input.intent(), Intent::Both);
        assert!(input.intent().wants_up() && input.intent().wants_down());

        input.key_up(Key::Up);
        assert_eq!(input.intent(), Intent::Down);
    }

    #[test]
    fn test_touch_lifecycle() {
        let mut input = InputState::new();

        // Move without a start is ignored
        input.touch_move(200.0);
        assert_eq!(input.touch_target(), None);

        input.touch_start(100.0);
        input.touch_move(150.0);
        assert_eq!(input.touch_target(), Some(150.0));

        // Garbage coordinates keep the last good value
        input.touch_move(f32::NAN);
        assert_eq!(input.touch_target(), Some(150.0));

        input.touch_end();
        assert_eq!(input.tick_input().touch_y, None);
    }

    #[test]
    fn test_reset() {
        let mut input = InputState::new();
        input.key_down(Key::Down);
        input.touch_start(10.0);
        input.reset();
        assert_eq!(input.intent(), Intent::Still);
        assert_eq!(input.touch_target(), None);
    }
}
