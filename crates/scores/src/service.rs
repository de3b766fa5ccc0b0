//! Score service runtime integration.
//!
//! Bridges the sync game loop with the async [`ScoreBoard`]. The board lives
//! on one actor task inside a private tokio runtime; the game loop sends
//! requests and polls for updates without ever blocking.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::board::{SaveTarget, ScoreBoard};
use crate::config::ScoreConfig;
use crate::log::EventLog;
use crate::record::{ScoreEntry, ScoreSubmission};

/// Request delivered to the actor task.
#[derive(Debug, Clone)]
pub enum ScoreRequest {
    Save(ScoreSubmission),
    Top(usize),
}

/// Result delivered back to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreUpdate {
    /// Remote reachability changed (first one follows the startup ping)
    Connection { online: bool },
    /// A save finished; `None` when it was lost
    Saved { target: Option<SaveTarget> },
    TopScores(Vec<ScoreEntry>),
}

#[derive(Debug)]
struct Job {
    generation: u64,
    request: ScoreRequest,
}

#[derive(Debug)]
struct Envelope {
    /// `None` for status updates that are never discarded
    generation: Option<u64>,
    update: ScoreUpdate,
}

/// Running score service instance.
pub struct ScoreService {
    _rt: Runtime,
    job_tx: mpsc::UnboundedSender<Job>,
    update_rx: mpsc::UnboundedReceiver<Envelope>,
    generation: u64,
}

impl ScoreService {
    /// Start the service from environment variables.
    pub fn start_from_env() -> Result<Self> {
        Self::start(ScoreConfig::from_env())
    }

    pub fn start(config: ScoreConfig) -> Result<Self> {
        let rt = Runtime::new().context("Failed to create tokio runtime")?;
        let (job_tx, mut job_rx) = mpsc::unbounded_channel::<Job>();
        let (update_tx, update_rx) = mpsc::unbounded_channel::<Envelope>();

        rt.spawn(async move {
            let log = EventLog::from_path(config.log_path.clone());
            let mut board = ScoreBoard::from_config(&config, log);

            let mut online = board.initialize().await;
            let _ = update_tx.send(Envelope {
                generation: None,
                update: ScoreUpdate::Connection { online },
            });

            while let Some(job) = job_rx.recv().await {
                let update = match job.request {
                    ScoreRequest::Save(submission) => ScoreUpdate::Saved {
                        target: board.save_score(submission).await,
                    },
                    ScoreRequest::Top(limit) => ScoreUpdate::TopScores(board.top_scores(limit).await),
                };
                if update_tx
                    .send(Envelope {
                        generation: Some(job.generation),
                        update,
                    })
                    .is_err()
                {
                    break;
                }

                if board.is_connected() != online {
                    online = board.is_connected();
                    let _ = update_tx.send(Envelope {
                        generation: None,
                        update: ScoreUpdate::Connection { online },
                    });
                }
            }
        });

        Ok(Self {
            _rt: rt,
            job_tx,
            update_rx,
            generation: 0,
        })
    }

    fn send(&self, request: ScoreRequest) {
        let _ = self.job_tx.send(Job {
            generation: self.generation,
            request,
        });
    }

    pub fn request_save(&self, submission: ScoreSubmission) {
        self.send(ScoreRequest::Save(submission));
    }

    pub fn request_top(&self, limit: usize) {
        self.send(ScoreRequest::Top(limit));
    }

    /// Next update for a request issued since the last `discard_pending`
    pub fn try_recv(&mut self) -> Option<ScoreUpdate> {
        while let Ok(env) = self.update_rx.try_recv() {
            match env.generation {
                Some(g) if g != self.generation => continue,
                _ => return Some(env.update),
            }
        }
        None
    }

    /// Drop the results of every request issued so far
    pub fn discard_pending(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
