//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game intents.
///
/// Letters are case-insensitive; Ctrl chords never map to an intent.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::SoftDrop),
        KeyCode::Up => Some(Intent::Rotate),
        KeyCode::Char(c) => letter_intent(c.to_ascii_lowercase()),
        _ => None,
    }
}

fn letter_intent(c: char) -> Option<Intent> {
    match c {
        // Arrows on the home row (vi) and on WASD
        'h' | 'a' => Some(Intent::MoveLeft),
        'l' | 'd' => Some(Intent::MoveRight),
        'j' | 's' => Some(Intent::SoftDrop),
        'k' | 'w' => Some(Intent::Rotate),
        ' ' => Some(Intent::HardDrop),
        'r' => Some(Intent::Restart),
        _ => None,
    }
}

/// Edit to the player-name field on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameEdit {
    Insert(char),
    Backspace,
    /// Save the score under the typed name
    Submit,
    /// Skip saving and start a new game
    Cancel,
}

/// Map keyboard input on the game-over screen.
///
/// Every printable character goes into the name, including letters that are
/// bound to game intents during play.
pub fn handle_name_key(key: KeyEvent) -> Option<NameEdit> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Enter => Some(NameEdit::Submit),
        KeyCode::Esc => Some(NameEdit::Cancel),
        KeyCode::Backspace => Some(NameEdit::Backspace),
        KeyCode::Char(c) if !c.is_control() => Some(NameEdit::Insert(c)),
        _ => None,
    }
}

/// Ctrl-C, which quits from every screen.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if key should quit the game (during play).
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || is_interrupt(key)
}
