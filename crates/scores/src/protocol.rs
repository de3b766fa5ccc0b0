//! Protocol module - JSON messages between the game and the score server
//!
//! One JSON object per line over TCP. Requests carry a `type` tag:
//!
//! ```text
//! {"type":"ping"}
//! {"type":"save_score","name":"Ada","score":1200,"level":3,"lines":25}
//! {"type":"top_scores","limit":10}
//! ```
//!
//! Every request is answered with exactly one response line:
//!
//! ```text
//! {"status":"success","message":"Score saved"}
//! {"status":"success","data":[{"name":"Ada","score":1200,...}],"count":1}
//! {"status":"error","message":"Name is required"}
//! ```

use serde::{Deserialize, Serialize};

use crate::record::{ScoreEntry, ScoreSubmission};
use crate::types::DEFAULT_TOP_SCORES;

/// Client -> server request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Ping,
    SaveScore(ScoreSubmission),
    TopScores {
        #[serde(default = "default_limit")]
        limit: usize,
    },
}

fn default_limit() -> usize {
    DEFAULT_TOP_SCORES
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// Server -> client response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ScoreEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Response {
    pub fn ok(message: &str) -> Self {
        Self {
            status: Status::Success,
            message: Some(message.to_string()),
            data: None,
            count: None,
        }
    }

    pub fn scores(data: Vec<ScoreEntry>) -> Self {
        Self {
            status: Status::Success,
            message: None,
            count: Some(data.len()),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: None,
            count: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Parse one request line
pub fn parse_request(line: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ping() {
        assert_eq!(parse_request(r#"{"type":"ping"}"#).unwrap(), Request::Ping);
    }

    #[test]
    fn parse_save_score() {
        let req =
            parse_request(r#"{"type":"save_score","name":"Ada","score":1200,"level":3,"lines":25}"#)
                .unwrap();
        match req {
            Request::SaveScore(s) => {
                assert_eq!(s.name, "Ada");
                assert_eq!(s.score, 1200);
                assert_eq!(s.level, 3);
                assert_eq!(s.lines, 25);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn top_scores_limit_defaults() {
        assert_eq!(
            parse_request(r#"{"type":"top_scores"}"#).unwrap(),
            Request::TopScores { limit: 10 }
        );
        assert_eq!(
            parse_request(r#"{"type":"top_scores","limit":3}"#).unwrap(),
            Request::TopScores { limit: 3 }
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(parse_request(r#"{"type":"drop_table"}"#).is_err());
        assert!(parse_request("not json").is_err());
    }

    #[test]
    fn request_serializes_with_type_tag() {
        let v = serde_json::to_value(Request::TopScores { limit: 5 }).unwrap();
        assert_eq!(v["type"], "top_scores");
        assert_eq!(v["limit"], 5);
    }

    #[test]
    fn error_response_shape() {
        let v = serde_json::to_value(Response::error("Invalid JSON data")).unwrap();
        assert_eq!(v["status"], "error");
        assert_eq!(v["message"], "Invalid JSON data");
        assert!(v.get("data").is_none());
    }

    #[test]
    fn scores_response_has_count() {
        let r = Response::scores(Vec::new());
        assert!(r.is_success());
        assert_eq!(r.count, Some(0));
    }
}
