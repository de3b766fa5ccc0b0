//! Remote score server client.
//!
//! Each request opens a fresh connection, writes one line and reads one line
//! back, all under a single timeout.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::protocol::{Request, Response};
use crate::record::{ScoreEntry, ScoreSubmission};

#[derive(Debug, Clone)]
pub struct RemoteClient {
    addr: String,
    timeout: Duration,
}

impl RemoteClient {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Send one request and wait for its response
    pub async fn request(&self, req: &Request) -> Result<Response> {
        tokio::time::timeout(self.timeout, self.exchange(req))
            .await
            .with_context(|| format!("Request to {} timed out", self.addr))?
    }

    async fn exchange(&self, req: &Request) -> Result<Response> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .with_context(|| format!("Failed to connect to {}", self.addr))?;
        let (read_half, mut write_half) = stream.into_split();

        let mut line = serde_json::to_vec(req)?;
        line.push(b'\n');
        write_half.write_all(&line).await?;
        write_half.flush().await?;

        let mut reader = BufReader::new(read_half);
        let mut resp = String::new();
        if reader.read_line(&mut resp).await? == 0 {
            bail!("Connection closed by {}", self.addr);
        }
        let resp: Response = serde_json::from_str(resp.trim())
            .with_context(|| format!("Malformed response from {}", self.addr))?;
        Ok(resp)
    }

    pub async fn ping(&self) -> Result<()> {
        let resp = self.request(&Request::Ping).await?;
        expect_success(resp).map(|_| ())
    }

    pub async fn save_score(&self, submission: &ScoreSubmission) -> Result<()> {
        let resp = self
            .request(&Request::SaveScore(submission.clone()))
            .await?;
        expect_success(resp).map(|_| ())
    }

    pub async fn top_scores(&self, limit: usize) -> Result<Vec<ScoreEntry>> {
        let resp = self.request(&Request::TopScores { limit }).await?;
        let resp = expect_success(resp)?;
        Ok(resp.data.unwrap_or_default())
    }
}

fn expect_success(resp: Response) -> Result<Response> {
    if !resp.is_success() {
        bail!(
            "Server error: {}",
            resp.message.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_becomes_err() {
        let err = expect_success(Response::error("Name is required")).unwrap_err();
        assert!(err.to_string().contains("Name is required"));
        assert!(expect_success(Response::ok("pong")).is_ok());
    }

    #[test]
    fn unreachable_server_fails() {
        // Port 1 on localhost is never a score server
        let client = RemoteClient::new("127.0.0.1:1", Duration::from_millis(500));
        let res = tokio_test::block_on(async {
            tokio::time::timeout(Duration::from_secs(2), client.ping()).await
        });
        // Either the connect is refused or the client-side timeout fires
        match res {
            Ok(inner) => assert!(inner.is_err()),
            Err(_) => panic!("client timeout did not bound the request"),
        }
    }
}
