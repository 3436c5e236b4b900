//! Text input buffer for the typing modes.

/// A single-line text buffer with a cursor.
///
/// Owned by the `Typing` mode variant, so a buffer only exists while an
/// input workflow is in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
        }
    }

    /// Create an input field pre-seeded with an existing value, cursor at
    /// the end. Used by the edit and assign workflows so the operator
    /// corrects in place instead of retyping.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    /// Insert a character at the cursor.
    pub fn handle_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .chars()
                .next_back()
                .map(|c| c.len_utf8())
                .unwrap_or(0);
            self.cursor -= prev;
            self.value.remove(self.cursor);
        }
    }

    /// Move cursor one character to the left.
    pub fn move_cursor_left(&mut self) {
        if let Some(c) = self.value[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    /// Move cursor one character to the right.
    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    /// The committed form of the buffer: surrounding whitespace stripped.
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace() {
        let mut field = InputField::new();
        for c in "abc".chars() {
            field.handle_char(c);
        }
        field.handle_backspace();
        assert_eq!(field.value, "ab");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn edits_at_cursor_position() {
        let mut field = InputField::with_value("ac");
        field.move_cursor_left();
        field.handle_char('b');
        assert_eq!(field.value, "abc");
    }

    #[test]
    fn backspace_on_empty_is_a_no_op() {
        let mut field = InputField::new();
        field.handle_backspace();
        assert_eq!(field.value, "");
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut field = InputField::with_value("é");
        field.handle_char('x');
        field.handle_backspace();
        field.handle_backspace();
        assert_eq!(field.value, "");
    }
}
