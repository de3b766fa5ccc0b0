//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]s during play and
//! into name-field edits on the game-over screen. Debounce is not done here;
//! the session decides whether an intent is accepted.

pub mod map;
pub mod name;

pub use arcade_tetris_types as types;

pub use map::{handle_key_event, handle_name_key, is_interrupt, should_quit, NameEdit};
pub use name::NameField;
