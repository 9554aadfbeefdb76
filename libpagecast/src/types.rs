//! Core types for Pagecast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message retrieved from the source channel
///
/// Read-only snapshot of the external message; the photo itself is only
/// materialized on disk transiently while the message is being published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMessage {
    /// Source-assigned message identifier
    pub id: i32,
    /// Creation time of the message (UTC)
    pub date: DateTime<Utc>,
    /// Text body; may be empty for media-only messages
    pub text: String,
    /// Whether the message carries a photo attachment
    pub has_photo: bool,
}

impl SourceMessage {
    pub fn new(id: i32, date: DateTime<Utc>, text: impl Into<String>, has_photo: bool) -> Self {
        Self {
            id,
            date,
            text: text.into(),
            has_photo,
        }
    }

    /// True when the message has no usable text body
    pub fn is_text_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Summary of one relay run, used for logging and for the process exit line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Messages returned by the source batch
    pub fetched: usize,
    /// Messages newer than the checkpoint
    pub selected: usize,
    /// Messages successfully published
    pub published: usize,
    /// Messages whose publish attempt failed (dropped, not retried)
    pub failed: usize,
    /// Messages skipped because they had no text
    pub skipped_no_text: usize,
    /// Checkpoint value written at the end of the run
    pub checkpoint: Option<DateTime<Utc>>,
}
