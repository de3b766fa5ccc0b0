//! JSON-lines event log for persistence activity.
//!
//! The game draws to the alternate screen, so nothing may go to stdout while
//! it runs. Records are sent over an unbounded channel to a background task
//! that appends one JSON object per line. Without a path, records are dropped.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub ts: DateTime<Utc>,
    pub level: LogLevel,
    pub event: &'static str,
    pub message: String,
}

/// Cheap, cloneable handle to the log writer task
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    tx: Option<mpsc::UnboundedSender<LogRecord>>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Start the writer task. Must be called from inside a tokio runtime.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogRecord>();
        tokio::spawn(async move {
            use tokio::fs::OpenOptions;
            use tokio::io::AsyncWriteExt;

            if let Some(dir) = path.parent() {
                let _ = tokio::fs::create_dir_all(dir).await;
            }
            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(_) => return,
            };

            let mut buf: Vec<u8> = Vec::with_capacity(512);
            while let Some(rec) = rx.recv().await {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if file.write_all(&buf).await.is_err() {
                    break;
                }
            }

            let _ = file.flush().await;
        });
        Self { tx: Some(tx) }
    }

    /// Spawn when a path is configured, otherwise a disabled log
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::spawn(p),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn info(&self, event: &'static str, message: impl Into<String>) {
        self.emit(LogLevel::Info, event, message.into());
    }

    pub fn warn(&self, event: &'static str, message: impl Into<String>) {
        self.emit(LogLevel::Warn, event, message.into());
    }

    pub fn error(&self, event: &'static str, message: impl Into<String>) {
        self.emit(LogLevel::Error, event, message.into());
    }

    fn emit(&self, level: LogLevel, event: &'static str, message: String) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(LogRecord {
                ts: Utc::now(),
                level,
                event,
                message,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn disabled_log_drops_records() {
        let log = EventLog::disabled();
        assert!(!log.is_enabled());
        log.info("noop", "nothing happens");
    }

    #[tokio::test]
    async fn writes_one_json_object_per_line() {
        let path = std::env::temp_dir().join(format!(
            "arcade-tetris-log-{}-{}.jsonl",
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let _ = std::fs::remove_file(&path);

        let log = EventLog::spawn(path.clone());
        log.info("save_score", "saved remotely");
        log.warn("remote_unavailable", "connection refused");
        drop(log);

        let mut text = String::new();
        for _ in 0..100 {
            text = tokio::fs::read_to_string(&path).await.unwrap_or_default();
            if text.lines().count() >= 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "info");
        assert_eq!(lines[0]["event"], "save_score");
        assert_eq!(lines[1]["level"], "warn");
        assert!(lines[1]["ts"].as_str().is_some());

        let _ = std::fs::remove_file(&path);
    }
}
