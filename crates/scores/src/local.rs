//! On-disk score storage used when the remote server is unreachable.
//!
//! Two files live in the store directory:
//! - `scores.json`: scores saved locally, best-first, at most 100
//! - `scores_cache.json`: the last top list fetched from the server

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{rank, ScoreEntry};
use crate::types::LOCAL_SCORES_CAP;

pub const SCORES_FILE: &str = "scores.json";
pub const CACHE_FILE: &str = "scores_cache.json";

/// Last remote top list and when it was fetched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCache {
    pub fetched_at: Option<DateTime<Utc>>,
    pub scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn scores_path(&self) -> PathBuf {
        self.dir.join(SCORES_FILE)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE)
    }

    /// All locally saved scores, best-first. A missing file is an empty list.
    pub fn load_scores(&self) -> Result<Vec<ScoreEntry>> {
        let path = self.scores_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut scores: Vec<ScoreEntry> = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        rank(&mut scores, LOCAL_SCORES_CAP);
        Ok(scores)
    }

    /// Insert one entry, keeping the file sorted and capped.
    ///
    /// An unreadable or malformed file is replaced.
    pub fn save_score(&self, entry: ScoreEntry) -> Result<()> {
        let mut scores = self.load_scores().unwrap_or_default();
        scores.push(entry);
        rank(&mut scores, LOCAL_SCORES_CAP);
        self.write_json(&self.scores_path(), &scores)
    }

    pub fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>> {
        let mut scores = self.load_scores()?;
        scores.truncate(limit);
        Ok(scores)
    }

    pub fn load_cache(&self) -> Result<Option<ScoreCache>> {
        let path = self.cache_path();
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let cache = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(cache))
    }

    pub fn store_cache(&self, scores: &[ScoreEntry], fetched_at: DateTime<Utc>) -> Result<()> {
        let cache = ScoreCache {
            fetched_at: Some(fetched_at),
            scores: scores.to_vec(),
        };
        self.write_json(&self.cache_path(), &cache)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let text = serde_json::to_string_pretty(value)?;
        fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
