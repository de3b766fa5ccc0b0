//! Score server binary.
//!
//! Configured through `TETRIS_SCORES_HOST`, `TETRIS_SCORES_PORT` and
//! `TETRIS_SCORES_DATA`.

use anyhow::Result;

use arcade_tetris::scores::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env();
    println!(
        "[ScoreServer] Starting on {}:{} (data: {})",
        config.host,
        config.port,
        config.data_path.display()
    );
    run_server(config, None).await
}
