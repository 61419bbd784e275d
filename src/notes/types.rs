//! Note record and the errors storage operations report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A note record, matching the `notes` table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned surrogate key. Never reused.
    pub id: i64,
    /// Free text. Never empty after trimming.
    pub content: String,
    /// RFC 3339 creation timestamp, `None` for rows that predate schema v2.
    pub created_at: Option<String>,
    /// RFC 3339 timestamp of the last edit, or of creation if never edited.
    pub updated_at: Option<String>,
}

impl Note {
    /// A note without timestamps, for callers that build collections by hand.
    pub fn new(id: i64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(i64),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
