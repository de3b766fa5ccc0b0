//! Player name field for the game-over screen.

use crate::types::MAX_NAME_LEN;

/// Text typed by the player, capped at [`MAX_NAME_LEN`] characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameField {
    text: String,
}

impl NameField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character; returns false when the field is full.
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.text.chars().count() >= MAX_NAME_LEN {
            return false;
        }
        self.text.push(c);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the trimmed text is empty
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
