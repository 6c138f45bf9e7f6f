//! Progress frame parsing and the per-file progress record.
//!
//! The processing service occasionally flushes several JSON objects into one
//! websocket frame with no separator between them. The salvage path below
//! extracts every flat `{...}` object from such a frame and keeps the first
//! one that parses; this first-match-wins behavior is load-bearing for wire
//! compatibility with existing emitters and must not be changed.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// Processing status reported for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl ProgressStatus {
    /// True for statuses after which no further events are expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProgressStatus::Completed | ProgressStatus::Error)
    }
}

/// Latest known progress for one file, keyed by `file_name` in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressRecord {
    pub file_name: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(rename = "progress", default)]
    pub progress_percent: u8,
    pub status: ProgressStatus,
    #[serde(default)]
    pub processed_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A frame that could not be interpreted under either parsing strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub detail: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed progress frame: {}", self.detail)
    }
}

/// Parses one inbound frame into a [`ProgressRecord`].
///
/// Strategy 1: the whole payload is a single well-formed record.
/// Strategy 2: the payload is a concatenation of records without separators;
/// every flat `{...}` substring is tried and the first that parses wins,
/// the rest of the batch is discarded.
pub fn parse_frame(raw: &str) -> Result<ProgressRecord, ParseError> {
    let whole = match serde_json::from_str::<ProgressRecord>(raw) {
        Ok(record) => return Ok(record),
        Err(err) => err,
    };

    for candidate in flat_object_pattern().find_iter(raw) {
        if let Ok(record) = serde_json::from_str::<ProgressRecord>(candidate.as_str()) {
            return Ok(record);
        }
    }

    Err(ParseError {
        detail: whole.to_string(),
    })
}

fn flat_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{[^{}]+\}").expect("flat object pattern"))
}
