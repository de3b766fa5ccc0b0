//! Arcade Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `arcade_tetris::{core,input,scores,term,types}`.

pub use arcade_tetris_core as core;
pub use arcade_tetris_input as input;
pub use arcade_tetris_scores as scores;
pub use arcade_tetris_term as term;
pub use arcade_tetris_types as types;
