//! Source channel abstraction and implementations
//!
//! A [`ChannelSource`] hands the pipeline the most recent batch of messages
//! from one channel and can materialize a message's photo attachment on
//! disk. The Telegram implementation talks MTProto through a saved session;
//! the mock implementation backs the offline test suite.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::SourceMessage;

pub mod telegram;

// Mock source is available for all builds to support integration tests
pub mod mock;

/// Read-only access to one source channel
#[async_trait]
pub trait ChannelSource: Send + Sync {
    /// Fetch up to `limit` of the channel's most recent messages
    ///
    /// Returns a single batch, newest first, with no further pagination.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Authentication` when the stored credentials are
    /// rejected and `SourceError::ChannelResolution` when the configured
    /// channel handle cannot be resolved. Both are fatal for the run.
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<SourceMessage>>;

    /// Download the photo attached to `message` into `dest`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Download` when the message has no downloadable
    /// media or the transfer fails. The caller treats this as a per-message
    /// failure, not a run failure.
    async fn download_photo(&self, message: &SourceMessage, dest: &Path) -> Result<()>;

    /// Lowercase identifier for the source (e.g. "telegram")
    fn name(&self) -> &str;
}
