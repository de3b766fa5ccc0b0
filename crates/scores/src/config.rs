//! Environment-driven configuration for the score client and server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_TIMEOUT_MS: u64 = 1500;

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false)
}

/// Game-side persistence settings
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Remote score server; `None` keeps everything local
    pub remote_addr: Option<String>,
    /// Directory holding `scores.json` and `scores_cache.json`
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            remote_addr: Some(format!("127.0.0.1:{}", DEFAULT_PORT)),
            data_dir: default_data_dir(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            log_path: None,
        }
    }
}

impl ScoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let remote_addr = if env_flag("TETRIS_SCORES_DISABLED") {
            None
        } else {
            Some(env_opt("TETRIS_SCORES_ADDR").unwrap_or_else(|| format!("127.0.0.1:{}", DEFAULT_PORT)))
        };

        let data_dir = env_opt("TETRIS_SCORES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let timeout_ms = env_opt("TETRIS_SCORES_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            remote_addr,
            data_dir,
            timeout: Duration::from_millis(timeout_ms),
            log_path: env_opt("TETRIS_SCORES_LOG_PATH").map(PathBuf::from),
        }
    }

    /// Local-only configuration rooted at `data_dir`
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            remote_addr: None,
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }
}

fn default_data_dir() -> PathBuf {
    match env_opt("HOME") {
        Some(home) => PathBuf::from(home).join(".arcade-tetris"),
        None => PathBuf::from(".arcade-tetris"),
    }
}

/// Score server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON file holding every saved entry
    pub data_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from("scores_db.json"),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let host = env_opt("TETRIS_SCORES_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = env_opt("TETRIS_SCORES_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = env_opt("TETRIS_SCORES_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("scores_db.json"));

        Self {
            host,
            port,
            data_path,
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let c = ServerConfig::default();
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 7878);
        assert_eq!(c.socket_addr().unwrap().port(), 7878);
    }

    #[test]
    fn bad_host_is_an_error() {
        let c = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(c.socket_addr().is_err());
    }

    #[test]
    fn local_config_has_no_remote() {
        let c = ScoreConfig::local("/tmp/x");
        assert!(c.remote_addr.is_none());
        assert_eq!(c.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(c.timeout, Duration::from_millis(1500));
    }
}
