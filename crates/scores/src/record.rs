//! Score records and submission validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MAX_NAME_LEN;

/// Display format for score dates (`dd/mm/YYYY HH:MM`)
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// A saved score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub date: DateTime<Utc>,
}

impl ScoreEntry {
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Reason a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    NameTooLong,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "Name is required"),
            ValidationError::NameTooLong => {
                write!(f, "Name too long (max {})", MAX_NAME_LEN)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated score ready to be stored.
///
/// Construct through [`ScoreSubmission::new`] or run [`ScoreSubmission::validate`]
/// on deserialized input: the name is trimmed and 1..=50 characters long, the
/// level is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl ScoreSubmission {
    pub fn new(name: &str, score: u32, level: u32, lines: u32) -> Result<Self, ValidationError> {
        Self {
            name: name.to_string(),
            score,
            level,
            lines,
        }
        .validate()
    }

    pub fn validate(mut self) -> Result<Self, ValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong);
        }
        self.name = trimmed.to_string();
        self.level = self.level.max(1);
        Ok(self)
    }

    pub fn into_entry(self, date: DateTime<Utc>) -> ScoreEntry {
        ScoreEntry {
            name: self.name,
            score: self.score,
            level: self.level,
            lines: self.lines,
            date,
        }
    }
}

/// Sort best-first and keep at most `cap` entries.
///
/// Equal scores keep their existing order, so earlier saves rank higher.
pub fn rank(entries: &mut Vec<ScoreEntry>, cap: usize) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(cap);
}
