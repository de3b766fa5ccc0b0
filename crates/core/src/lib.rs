//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable without a terminal
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision test, locking and line clearing
//! - [`game_state`]: The session: active/next piece, gravity, game-over state machine
//! - [`input_gate`]: Per-intent debounce
//! - [`pieces`]: Shape catalog and clockwise matrix rotation
//! - [`rng`]: Seeded piece generator (independent shape and color)
//! - [`scoring`]: Line-clear points, levels and gravity speed-up
//! - [`snapshot`]: Read-only view for renderers
//!
//! # Game Rules
//!
//! - Uniformly random shape and color, drawn independently
//! - Clockwise rotation with a two-offset horizontal kick (no SRS tables)
//! - No lock delay: a blocked downward move locks immediately
//! - Hard drop scores one point per row descended
//! - Line clears score `[0, 100, 300, 500, 800][n] * level`
//! - Every 10 lines raises the level by one and shortens gravity by 100ms (floor 100ms)
//!
//! # Example
//!
//! ```
//! use arcade_tetris_core::GameSession;
//! use arcade_tetris_types::Intent;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply_intent(Intent::MoveRight);
//! game.apply_intent(Intent::Rotate);
//! game.apply_intent(Intent::HardDrop);
//!
//! // Hard drop awards points
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`](game_state::GameSession::tick) every frame with
//! the elapsed time. Gravity fires once more than the current interval has
//! passed since the last downward move.

pub mod board;
pub mod game_state;
pub mod input_gate;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use arcade_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{collides, Board};
pub use game_state::GameSession;
pub use input_gate::InputGate;
pub use pieces::{get_shape, Matrix, Piece};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_line_score, Progress, ScoreResult};
pub use snapshot::GameSnapshot;
