//! Mock channel source for testing
//!
//! Serves a scripted batch of messages and fake photo bytes without any
//! network access, and counts calls so tests can verify pipeline behavior.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Result, SourceError};
use crate::source::ChannelSource;
use crate::types::SourceMessage;

/// Configuration for mock source behavior
#[derive(Debug, Clone)]
pub struct MockSourceConfig {
    /// Batch returned by fetch_recent (truncated to the requested limit)
    pub batch: Vec<SourceMessage>,

    /// Error message to fail fetch_recent with
    pub fetch_error: Option<String>,

    /// Treat the fetch error as an authentication failure
    pub fetch_error_is_auth: bool,

    /// Bytes written when a photo is downloaded
    pub photo_bytes: Vec<u8>,

    /// Error message to fail download_photo with
    pub download_error: Option<String>,

    /// Number of times fetch_recent has been called
    pub fetch_call_count: Arc<Mutex<usize>>,

    /// Destinations that download_photo wrote to (for verification)
    pub downloaded_to: Arc<Mutex<Vec<std::path::PathBuf>>>,
}

impl Default for MockSourceConfig {
    fn default() -> Self {
        Self {
            batch: Vec::new(),
            fetch_error: None,
            fetch_error_is_auth: false,
            photo_bytes: b"\xff\xd8fake-jpeg".to_vec(),
            download_error: None,
            fetch_call_count: Arc::new(Mutex::new(0)),
            downloaded_to: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Mock source for testing
pub struct MockSource {
    config: MockSourceConfig,
}

impl MockSource {
    pub fn new(config: MockSourceConfig) -> Self {
        Self { config }
    }

    /// Create a mock source that serves the given batch
    pub fn with_batch(batch: Vec<SourceMessage>) -> Self {
        Self::new(MockSourceConfig {
            batch,
            ..Default::default()
        })
    }

    /// Create a mock source whose fetch always fails
    pub fn fetch_failure(error: &str) -> Self {
        Self::new(MockSourceConfig {
            fetch_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &MockSourceConfig {
        &self.config
    }
}

#[async_trait]
impl ChannelSource for MockSource {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<SourceMessage>> {
        *self.config.fetch_call_count.lock().unwrap() += 1;

        if let Some(error) = &self.config.fetch_error {
            if self.config.fetch_error_is_auth {
                return Err(SourceError::Authentication(error.clone()).into());
            }
            return Err(SourceError::Fetch(error.clone()).into());
        }

        Ok(self.config.batch.iter().take(limit).cloned().collect())
    }

    async fn download_photo(&self, message: &SourceMessage, dest: &Path) -> Result<()> {
        if let Some(error) = &self.config.download_error {
            return Err(SourceError::Download(error.clone()).into());
        }
        if !message.has_photo {
            return Err(SourceError::Download(format!(
                "Message {} has no downloadable media",
                message.id
            ))
            .into());
        }

        std::fs::write(dest, &self.config.photo_bytes)
            .map_err(|e| SourceError::Download(format!("write failed: {}", e)))?;
        self.config
            .downloaded_to
            .lock()
            .unwrap()
            .push(dest.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock-source"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_fetch_respects_limit() {
        let now = Utc::now();
        let batch = (0..10)
            .map(|i| SourceMessage::new(i, now, format!("m{}", i), false))
            .collect();
        let source = MockSource::with_batch(batch);

        let fetched = source.fetch_recent(5).await.unwrap();
        assert_eq!(fetched.len(), 5);
        assert_eq!(*source.config().fetch_call_count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let source = MockSource::fetch_failure("boom");
        let err = source.fetch_recent(5).await.unwrap_err();
        assert!(format!("{}", err).contains("boom"));
    }

    #[tokio::test]
    async fn test_download_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("msg_1.jpg");
        let message = SourceMessage::new(1, Utc::now(), "text", true);

        let source = MockSource::with_batch(vec![message.clone()]);
        source.download_photo(&message, &dest).await.unwrap();

        assert!(dest.exists());
        assert_eq!(source.config().downloaded_to.lock().unwrap().len(), 1);
    }
}
