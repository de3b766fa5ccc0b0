//! ScoreBoard: remote-first score persistence with local fallback.
//!
//! - `initialize` pings the server once and remembers the result.
//! - `save_score` tries the server while connected, otherwise (or on failure)
//!   writes to the local store.
//! - `top_scores` tries the server while connected and refreshes the cache,
//!   then falls back to the cache, then to local scores.
//!
//! Nothing here returns an error to the caller: failures become `false`, an
//! empty list, or a dropped connection flag, and are written to the event log.

use chrono::Utc;

use crate::client::RemoteClient;
use crate::config::ScoreConfig;
use crate::local::LocalStore;
use crate::log::EventLog;
use crate::record::{ScoreEntry, ScoreSubmission};

/// Where a save ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Remote,
    Local,
}

pub struct ScoreBoard {
    remote: Option<RemoteClient>,
    local: LocalStore,
    log: EventLog,
    connected: bool,
    initialized: bool,
}

impl ScoreBoard {
    pub fn new(remote: Option<RemoteClient>, local: LocalStore, log: EventLog) -> Self {
        Self {
            remote,
            local,
            log,
            connected: false,
            initialized: false,
        }
    }

    pub fn from_config(config: &ScoreConfig, log: EventLog) -> Self {
        let remote = config
            .remote_addr
            .as_ref()
            .map(|addr| RemoteClient::new(addr.clone(), config.timeout));
        Self::new(remote, LocalStore::new(config.data_dir.clone()), log)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Probe the server once; later calls return the cached result
    pub async fn initialize(&mut self) -> bool {
        if self.initialized {
            return self.connected;
        }
        self.initialized = true;

        let Some(remote) = &self.remote else {
            self.log.info("remote_disabled", "local scores only");
            return false;
        };

        match remote.ping().await {
            Ok(()) => {
                self.connected = true;
                self.log
                    .info("remote_connected", format!("score server at {}", remote.addr()));
            }
            Err(e) => {
                self.connected = false;
                self.log.warn("remote_unavailable", format!("{:#}", e));
            }
        }
        self.connected
    }

    /// Save a score; `None` when neither the server nor the local store took it
    pub async fn save_score(&mut self, submission: ScoreSubmission) -> Option<SaveTarget> {
        if self.connected {
            if let Some(remote) = &self.remote {
                match remote.save_score(&submission).await {
                    Ok(()) => {
                        self.log.info(
                            "save_score",
                            format!("saved {} for {} remotely", submission.score, submission.name),
                        );
                        return Some(SaveTarget::Remote);
                    }
                    Err(e) => {
                        self.connected = false;
                        self.log.warn("remote_save_failed", format!("{:#}", e));
                    }
                }
            }
        }

        let entry = submission.into_entry(Utc::now());
        let (name, score) = (entry.name.clone(), entry.score);
        match self.local.save_score(entry) {
            Ok(()) => {
                self.log
                    .info("save_score", format!("saved {} for {} locally", score, name));
                Some(SaveTarget::Local)
            }
            Err(e) => {
                self.log.error("local_save_failed", format!("{:#}", e));
                None
            }
        }
    }

    /// Best-first scores from the best available source; empty on failure
    pub async fn top_scores(&mut self, limit: usize) -> Vec<ScoreEntry> {
        if self.connected {
            if let Some(remote) = &self.remote {
                match remote.top_scores(limit).await {
                    Ok(scores) => {
                        if let Err(e) = self.local.store_cache(&scores, Utc::now()) {
                            self.log.warn("cache_write_failed", format!("{:#}", e));
                        }
                        return scores;
                    }
                    Err(e) => {
                        self.connected = false;
                        self.log.warn("remote_top_failed", format!("{:#}", e));
                    }
                }
            }
        }

        match self.local.load_cache() {
            Ok(Some(cache)) if !cache.scores.is_empty() => {
                return cache.scores.into_iter().take(limit).collect();
            }
            Ok(_) => {}
            Err(e) => self.log.warn("cache_read_failed", format!("{:#}", e)),
        }

        match self.local.top_scores(limit) {
            Ok(scores) => scores,
            Err(e) => {
                self.log.error("local_read_failed", format!("{:#}", e));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "arcade-tetris-board-{}-{}-{}",
            tag,
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[tokio::test]
    async fn local_only_board_saves_locally() {
        let dir = temp_dir("local");
        let mut board = ScoreBoard::from_config(&ScoreConfig::local(&dir), EventLog::disabled());

        assert!(!board.initialize().await);
        let sub = ScoreSubmission::new("Ada", 500, 2, 11).unwrap();
        assert_eq!(board.save_score(sub).await, Some(SaveTarget::Local));

        let top = board.top_scores(10).await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Ada");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn unreachable_remote_falls_back() {
        let dir = temp_dir("fallback");
        let remote = RemoteClient::new("127.0.0.1:1", Duration::from_millis(300));
        let mut board = ScoreBoard::new(Some(remote), LocalStore::new(&dir), EventLog::disabled());

        assert!(!board.initialize().await);
        assert!(!board.is_connected());

        let sub = ScoreSubmission::new("Bo", 42, 1, 0).unwrap();
        assert_eq!(board.save_score(sub).await, Some(SaveTarget::Local));
        assert_eq!(board.top_scores(10).await[0].score, 42);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn cache_wins_over_local_scores() {
        let dir = temp_dir("cache");
        let local = LocalStore::new(&dir);
        let cached = ScoreSubmission::new("Cached", 7000, 5, 48)
            .unwrap()
            .into_entry(Utc::now());
        local.store_cache(&[cached], Utc::now()).unwrap();
        let own = ScoreSubmission::new("Own", 10, 1, 0)
            .unwrap()
            .into_entry(Utc::now());
        local.save_score(own).unwrap();

        let mut board = ScoreBoard::new(None, local, EventLog::disabled());
        let top = board.top_scores(10).await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Cached");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn corrupt_files_yield_empty_list() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let local = LocalStore::new(&dir);
        std::fs::write(local.scores_path(), "[oops").unwrap();
        std::fs::write(local.cache_path(), "also bad").unwrap();

        let mut board = ScoreBoard::new(None, local, EventLog::disabled());
        assert!(board.top_scores(10).await.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
