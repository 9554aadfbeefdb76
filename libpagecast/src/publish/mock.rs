//! Mock publisher for testing
//!
//! Records every upload and publish call and can fail specific posts, so
//! tests can verify skip policy, failure isolation, and media-id plumbing
//! without network access.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{PublishError, Result};
use crate::publish::Publisher;

/// One recorded publish call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPost {
    pub text: String,
    pub media_id: Option<String>,
}

/// Configuration for mock publisher behavior
#[derive(Debug, Clone)]
pub struct MockPublisherConfig {
    /// Error returned from every upload_image call
    pub upload_error: Option<String>,

    /// Texts whose publish call fails (simulated HTTP 400)
    pub fail_texts: Vec<String>,

    /// Uploaded file paths (for verification)
    pub uploads: Arc<Mutex<Vec<PathBuf>>>,

    /// Successful publish calls (for verification)
    pub posts: Arc<Mutex<Vec<PublishedPost>>>,

    /// Number of publish attempts, including failed ones
    pub publish_call_count: Arc<Mutex<usize>>,
}

impl Default for MockPublisherConfig {
    fn default() -> Self {
        Self {
            upload_error: None,
            fail_texts: Vec::new(),
            uploads: Arc::new(Mutex::new(Vec::new())),
            posts: Arc::new(Mutex::new(Vec::new())),
            publish_call_count: Arc::new(Mutex::new(0)),
        }
    }
}

/// Mock publisher for testing
pub struct MockPublisher {
    config: MockPublisherConfig,
}

impl MockPublisher {
    pub fn new(config: MockPublisherConfig) -> Self {
        Self { config }
    }

    /// Create a mock publisher that always succeeds
    pub fn success() -> Self {
        Self::new(MockPublisherConfig::default())
    }

    /// Create a mock publisher that fails the publish of the given texts
    pub fn failing_texts(texts: &[&str]) -> Self {
        Self::new(MockPublisherConfig {
            fail_texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        })
    }

    /// Create a mock publisher whose uploads always fail
    pub fn upload_failure(error: &str) -> Self {
        Self::new(MockPublisherConfig {
            upload_error: Some(error.to_string()),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &MockPublisherConfig {
        &self.config
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn upload_image(&self, path: &Path) -> Result<String> {
        if let Some(error) = &self.config.upload_error {
            return Err(PublishError::Upload(error.clone()).into());
        }

        let mut uploads = self.config.uploads.lock().unwrap();
        uploads.push(path.to_path_buf());
        Ok(format!("media-{}", uploads.len()))
    }

    async fn publish(&self, text: &str, media_id: Option<&str>) -> Result<String> {
        *self.config.publish_call_count.lock().unwrap() += 1;

        if self.config.fail_texts.iter().any(|t| t == text) {
            return Err(PublishError::Posting(format!(
                "HTTP 400 Bad Request: {{\"error\":{{\"message\":\"rejected: {}\"}}}}",
                text
            ))
            .into());
        }

        let mut posts = self.config.posts.lock().unwrap();
        posts.push(PublishedPost {
            text: text.to_string(),
            media_id: media_id.map(str::to_string),
        });
        Ok(format!("post-{}", posts.len()))
    }

    fn name(&self) -> &str {
        "mock-publisher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_records_posts() {
        let publisher = MockPublisher::success();
        let post_id = publisher.publish("hello", None).await.unwrap();
        assert_eq!(post_id, "post-1");

        let posts = publisher.config().posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].text, "hello");
        assert_eq!(posts[0].media_id, None);
    }

    #[tokio::test]
    async fn test_failing_text_rejected() {
        let publisher = MockPublisher::failing_texts(&["bad"]);
        assert!(publisher.publish("bad", None).await.is_err());
        assert!(publisher.publish("good", None).await.is_ok());
        assert_eq!(*publisher.config().publish_call_count.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_upload_returns_sequential_media_ids() {
        let publisher = MockPublisher::success();
        let first = publisher.upload_image(Path::new("/tmp/a.jpg")).await.unwrap();
        let second = publisher.upload_image(Path::new("/tmp/b.jpg")).await.unwrap();
        assert_eq!(first, "media-1");
        assert_eq!(second, "media-2");
    }
}
