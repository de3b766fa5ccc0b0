//! Score persistence - remote score server with local fallback
//!
//! The game hands finished scores to this crate and asks it for a leaderboard.
//! It never touches game state.
//!
//! # Components
//!
//! - [`record`]: `ScoreEntry`, validated `ScoreSubmission`, ranking
//! - [`protocol`]: line-delimited JSON requests/responses
//! - [`server`]: tokio TCP server persisting entries to a JSON data file
//! - [`client`]: one-shot request client with a timeout
//! - [`local`]: `scores.json` / `scores_cache.json` in a local directory
//! - [`board`]: remote-first `ScoreBoard` with cache and local fallback
//! - [`service`]: sync bridge owned by the game loop
//! - [`log`]: JSON-lines event log
//!
//! # Environment Variables
//!
//! Client side:
//!
//! - `TETRIS_SCORES_ADDR`: Score server address (default: "127.0.0.1:7878")
//! - `TETRIS_SCORES_DISABLED`: Set to "1" or "true" to keep scores local only
//! - `TETRIS_SCORES_DIR`: Local store directory (default: "$HOME/.arcade-tetris")
//! - `TETRIS_SCORES_TIMEOUT_MS`: Per-request timeout (default: 1500)
//! - `TETRIS_SCORES_LOG_PATH`: JSON-lines event log (default: none)
//!
//! Server side:
//!
//! - `TETRIS_SCORES_HOST`: Bind address (default: "127.0.0.1")
//! - `TETRIS_SCORES_PORT`: Port number (default: 7878)
//! - `TETRIS_SCORES_DATA`: Data file (default: "scores_db.json")
//!
//! # Testing
//!
//! Talk to a running server with netcat:
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"save_score","name":"Ada","score":1200,"level":3,"lines":25}
//! {"type":"top_scores","limit":5}
//! ```

pub mod board;
pub mod client;
pub mod config;
pub mod local;
pub mod log;
pub mod protocol;
pub mod record;
pub mod server;
pub mod service;

pub use arcade_tetris_types as types;

pub use board::{SaveTarget, ScoreBoard};
pub use client::RemoteClient;
pub use config::{ScoreConfig, ServerConfig};
pub use local::{LocalStore, ScoreCache};
pub use log::EventLog;
pub use protocol::{parse_request, Request, Response, Status};
pub use record::{rank, ScoreEntry, ScoreSubmission, ValidationError, DATE_FORMAT};
pub use server::{run_server, ServerStore};
pub use service::{ScoreService, ScoreUpdate};
