//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot + HUD -> framebuffer (pure)
//! - [`effects`]: line-clear flash and level-up banner timers
//! - [`renderer`]: raw-mode terminal output with diffing

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use arcade_tetris_core as core;
pub use arcade_tetris_scores as scores;
pub use arcade_tetris_types as types;

pub use effects::{Effect, Effects};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette, AnchorY, GameView, HudView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
