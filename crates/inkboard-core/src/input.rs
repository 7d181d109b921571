//! Input events delivered to the canvas.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Keyboard key, named after DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character (or grapheme) to insert.
    Character(String),
    Backspace,
    Delete,
    Enter,
    Escape,
    Left,
    Right,
    Home,
    End,
    /// Anything else, kept by name.
    Other(String),
}

impl Key {
    /// Parse a DOM key name. Single-character names are printable characters.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Home" => Key::Home,
            "End" => Key::End,
            _ if name.chars().count() == 1 => Key::Character(name.to_string()),
            _ => Key::Other(name.to_string()),
        }
    }

    /// Keys that remove the selected shape.
    pub fn is_delete(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// A single input event in canvas-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    DoubleClick(Point),
    KeyDown(Key),
    /// Focus left the canvas (closes an open text edit).
    Blur,
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u64 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Detects double clicks for hosts that only report raw presses.
///
/// Timestamps are supplied by the caller in milliseconds.
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last: Option<(u64, Point)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press; returns true when it completes a double click.
    pub fn press(&mut self, time_ms: u64, position: Point) -> bool {
        if let Some((last_time, last_pos)) = self.last {
            let elapsed = time_ms.saturating_sub(last_time);
            if elapsed < DOUBLE_CLICK_TIME_MS && position.distance(last_pos) < DOUBLE_CLICK_DISTANCE {
                // A third press starts a new sequence.
                self.last = None;
                return true;
            }
        }
        self.last = Some((time_ms, position));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("Delete"), Key::Delete);
        assert_eq!(Key::from_name("a"), Key::Character("a".into()));
        assert_eq!(Key::from_name("é"), Key::Character("é".into()));
        assert_eq!(Key::from_name("Shift"), Key::Other("Shift".into()));
        assert!(Key::Backspace.is_delete());
        assert!(!Key::Enter.is_delete());
    }

    #[test]
    fn test_double_click_detection() {
        let mut clicks = ClickTracker::new();
        assert!(!clicks.press(1000, Point::new(100.0, 100.0)));
        assert!(clicks.press(1200, Point::new(102.0, 101.0)));
        // Third click starts over.
        assert!(!clicks.press(1300, Point::new(102.0, 101.0)));
    }

    #[test]
    fn test_double_click_too_far() {
        let mut clicks = ClickTracker::new();
        assert!(!clicks.press(0, Point::new(100.0, 100.0)));
        assert!(!clicks.press(100, Point::new(110.0, 100.0)));
    }

    #[test]
    fn test_double_click_too_slow() {
        let mut clicks = ClickTracker::new();
        assert!(!clicks.press(0, Point::new(0.0, 0.0)));
        assert!(!clicks.press(600, Point::new(0.0, 0.0)));
        assert!(clicks.press(700, Point::new(0.0, 0.0)));
    }
}
