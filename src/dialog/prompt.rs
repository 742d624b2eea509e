use super::input::{InputEdit, LineInput};

/// What a prompt accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Text,
    /// Digits only.
    Integer,
}

/// A modal single-line prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub label: String,
    pub kind: PromptKind,
    pub input: LineInput,
}

impl Prompt {
    pub fn text(title: &str, label: &str) -> Self {
        Self {
            title: title.to_string(),
            label: label.to_string(),
            kind: PromptKind::Text,
            input: LineInput::default(),
        }
    }

    pub fn integer(title: &str, label: &str) -> Self {
        Self {
            kind: PromptKind::Integer,
            ..Self::text(title, label)
        }
    }

    /// Pre-fill the input.
    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.input.set(value);
        self
    }

    pub fn apply(&mut self, edit: InputEdit) {
        if let (PromptKind::Integer, InputEdit::Insert(ch)) = (self.kind, edit)
            && !ch.is_ascii_digit()
        {
            return;
        }
        self.input.apply(edit);
    }

    pub fn value(&self) -> &str {
        self.input.text()
    }

    /// The value as a positive integer, if it is one.
    pub fn integer_value(&self) -> Option<u16> {
        self.value().parse::<u16>().ok().filter(|n| *n > 0)
    }
}
