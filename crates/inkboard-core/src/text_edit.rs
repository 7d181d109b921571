//! Inline text editing buffer.

use crate::input::Key;
use crate::shapes::ShapeId;
use kurbo::Point;

/// Result of handling a key while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Key consumed, buffer or cursor may have changed.
    Handled,
    /// User confirmed the edit.
    Commit,
    /// User abandoned the edit.
    Cancel,
    /// Key not meant for the editor.
    NotHandled,
}

/// An open text edit: the shape being edited (if any), where it is, and the
/// text typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    /// Existing text shape, or `None` when creating a new one.
    pub id: Option<ShapeId>,
    /// Baseline origin of the text.
    pub position: Point,
    pub font_size: f64,
    buffer: String,
    /// Cursor as a char index into `buffer`.
    cursor: usize,
}

impl TextEdit {
    /// Edit an existing text shape, seeded with its current text.
    pub fn existing(id: ShapeId, position: Point, text: &str, font_size: f64) -> Self {
        Self {
            id: Some(id),
            position,
            font_size,
            buffer: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    /// Start typing a new text at `position`.
    pub fn new_text(position: Point, font_size: f64) -> Self {
        Self {
            id: None,
            position,
            font_size,
            buffer: String::new(),
            cursor: 0,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole buffer, as a native input field would.
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.chars().count();
    }

    /// The text a commit would store.
    pub fn committed_text(&self) -> &str {
        self.buffer.trim()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    pub fn handle_key(&mut self, key: &Key) -> TextEditResult {
        match key {
            Key::Enter => return TextEditResult::Commit,
            Key::Escape => return TextEditResult::Cancel,
            Key::Character(text) => self.insert(text),
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
            }
            Key::Delete => {
                if self.cursor < self.buffer.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.buffer.chars().count()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.buffer.chars().count(),
            Key::Other(_) => return TextEditResult::NotHandled,
        }
        TextEditResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_appends() {
        let mut edit = TextEdit::existing(ShapeId::from("t"), Point::ZERO, "Hi", 16.0);
        assert_eq!(edit.cursor(), 2);
        for c in ["!", "!"] {
            assert_eq!(edit.handle_key(&Key::Character(c.into())), TextEditResult::Handled);
        }
        assert_eq!(edit.buffer(), "Hi!!");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut edit = TextEdit::new_text(Point::ZERO, 16.0);
        edit.set_buffer("héllo");
        edit.handle_key(&Key::Backspace);
        assert_eq!(edit.buffer(), "héll");
        edit.handle_key(&Key::Home);
        edit.handle_key(&Key::Right);
        edit.handle_key(&Key::Delete);
        assert_eq!(edit.buffer(), "hll");
        edit.handle_key(&Key::Home);
        edit.handle_key(&Key::Backspace);
        assert_eq!(edit.buffer(), "hll");
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut edit = TextEdit::existing(ShapeId::from("t"), Point::ZERO, "Hllo", 16.0);
        edit.handle_key(&Key::Home);
        edit.handle_key(&Key::Right);
        edit.handle_key(&Key::Character("e".into()));
        assert_eq!(edit.buffer(), "Hello");
        assert_eq!(edit.cursor(), 2);
        edit.handle_key(&Key::End);
        edit.handle_key(&Key::Right);
        assert_eq!(edit.cursor(), 5);
    }

    #[test]
    fn test_enter_and_escape() {
        let mut edit = TextEdit::new_text(Point::ZERO, 16.0);
        assert_eq!(edit.handle_key(&Key::Enter), TextEditResult::Commit);
        assert_eq!(edit.handle_key(&Key::Escape), TextEditResult::Cancel);
        assert_eq!(edit.handle_key(&Key::Other("F1".into())), TextEditResult::NotHandled);
    }

    #[test]
    fn test_committed_text_is_trimmed() {
        let mut edit = TextEdit::new_text(Point::ZERO, 16.0);
        edit.set_buffer("  padded  ");
        assert_eq!(edit.committed_text(), "padded");
    }
}
