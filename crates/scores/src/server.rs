//! TCP score server
//!
//! Accepts line-delimited JSON requests (see [`crate::protocol`]) and keeps
//! every saved entry in a JSON data file. Uses tokio for async networking.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Mutex};

use crate::config::ServerConfig;
use crate::protocol::{parse_request, Request, Response};
use crate::record::{rank, ScoreEntry};

/// Largest top list the server hands out
pub const MAX_TOP_LIMIT: usize = 100;

/// Persistent score table behind the server
#[derive(Debug)]
pub struct ServerStore {
    path: PathBuf,
    entries: Vec<ScoreEntry>,
}

impl ServerStore {
    /// Load the data file, starting empty when it does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut entries: Vec<ScoreEntry> = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Vec::new()
        };
        rank(&mut entries, usize::MAX);
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry and write the whole table back
    pub fn insert(&mut self, entry: ScoreEntry) -> Result<()> {
        self.entries.push(entry);
        rank(&mut self.entries, usize::MAX);
        self.persist()
    }

    pub fn top(&self, limit: usize) -> Vec<ScoreEntry> {
        let n = limit.min(MAX_TOP_LIMIT);
        self.entries.iter().take(n).cloned().collect()
    }

    fn persist(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// Start the TCP server
///
/// `ready_tx` receives the bound address once the listener is up (port 0 in tests).
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let store = ServerStore::open(&config.data_path)?;
    println!(
        "[ScoreServer] Loaded {} scores from {}",
        store.len(),
        store.path().display()
    );

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    println!("[ScoreServer] Listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let store = Arc::new(Mutex::new(store));
    let mut client_id_counter = 0usize;

    loop {
        let (socket, peer) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;

        let store = Arc::clone(&store);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, store).await {
                eprintln!("[ScoreServer] Client {} ({}) error: {}", client_id, peer, e);
            }
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    store: Arc<Mutex<ServerStore>>,
) -> Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let resp = match parse_request(trimmed) {
            Ok(req) => handle_request(req, &store, client_id).await,
            Err(_) => Response::error("Invalid JSON data"),
        };

        buf.clear();
        serde_json::to_writer(&mut buf, &resp)?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Answer one parsed request
pub async fn handle_request(
    req: Request,
    store: &Mutex<ServerStore>,
    client_id: usize,
) -> Response {
    match req {
        Request::Ping => Response::ok("pong"),
        Request::SaveScore(submission) => {
            let submission = match submission.validate() {
                Ok(s) => s,
                Err(e) => return Response::error(e.to_string()),
            };
            let entry = submission.into_entry(Utc::now());
            let (name, score) = (entry.name.clone(), entry.score);
            match store.lock().await.insert(entry) {
                Ok(()) => {
                    println!(
                        "[ScoreServer] Client {} saved {} for {}",
                        client_id, score, name
                    );
                    Response::ok("Score saved")
                }
                Err(e) => {
                    eprintln!("[ScoreServer] Failed to persist score: {:#}", e);
                    Response::error("Failed to save score")
                }
            }
        }
        Request::TopScores { limit } => Response::scores(store.lock().await.top(limit)),
    }
}
