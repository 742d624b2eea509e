/// Edit applied to a single-line text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Single-line text field with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the content, leaving the cursor at the end.
    pub fn set(&mut self, text: &str) {
        *self = Self::with_text(text);
    }

    /// Apply an edit. Control characters are never inserted.
    pub fn apply(&mut self, edit: InputEdit) {
        let len = self.text.chars().count();
        match edit {
            InputEdit::Insert(ch) if !ch.is_control() => {
                let byte = self.byte_at(self.cursor);
                self.text.insert(byte, ch);
                self.cursor += 1;
            }
            InputEdit::Insert(_) => {}
            InputEdit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte = self.byte_at(self.cursor);
                    self.text.remove(byte);
                }
            }
            InputEdit::Delete => {
                if self.cursor < len {
                    let byte = self.byte_at(self.cursor);
                    self.text.remove(byte);
                }
            }
            InputEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            InputEdit::Right => self.cursor = (self.cursor + 1).min(len),
            InputEdit::Home => self.cursor = 0,
            InputEdit::End => self.cursor = len,
        }
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
