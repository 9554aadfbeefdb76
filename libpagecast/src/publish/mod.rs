//! Destination publisher abstraction and implementations
//!
//! A [`Publisher`] turns composed text plus an optional local image into one
//! feed post on the destination platform. The Facebook implementation talks
//! to the Graph API over HTTP; the mock implementation backs the offline
//! test suite.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub mod facebook;

// Mock publisher is available for all builds to support integration tests
pub mod mock;

/// Write-only access to one destination feed
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Upload an image without publishing it, returning the media id
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Upload` on a non-success response and
    /// `PublishError::Network` on a transport failure. Both are per-message
    /// failures; the caller may still publish text-only.
    async fn upload_image(&self, path: &Path) -> Result<String>;

    /// Create one feed post, attaching `media_id` when present
    ///
    /// Returns the platform-issued post id, used only for logging.
    async fn publish(&self, text: &str, media_id: Option<&str>) -> Result<String>;

    /// Lowercase identifier for the destination (e.g. "facebook")
    fn name(&self) -> &str;
}
