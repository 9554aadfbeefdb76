//! Facebook Page publisher
//!
//! Talks to the Graph API directly: one multipart call to stage a photo
//! (`published=false`) and one form-encoded call to create the feed post,
//! linking the staged photo through `attached_media[0]`.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::FacebookConfig;
use crate::error::{PublishError, Result};
use crate::publish::Publisher;

/// Graph API responses carry the created object id
#[derive(Debug, Deserialize)]
struct GraphId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

/// Facebook implementation of [`Publisher`]
pub struct FacebookPublisher {
    http: reqwest::Client,
    page_id: String,
    page_token: String,
    base: String,
}

impl FacebookPublisher {
    pub fn new(config: &FacebookConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            page_id: config.page_id.clone(),
            page_token: config.page_token.clone(),
            base: config.graph_api_base.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, segment: &str) -> String {
        format!("{}/{}/{}", self.base, self.page_id, segment)
    }

    /// Connectivity self-check: fetch the page object with the page token
    ///
    /// Used by `pagecast-check` only; returns the page's display name.
    pub async fn check_page(&self) -> Result<String> {
        let url = format!("{}/{}", self.base, self.page_id);
        let response = self
            .http
            .get(&url)
            .query(&[("access_token", self.page_token.as_str())])
            .send()
            .await
            .map_err(|e| PublishError::Network(format!("Page check failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::Network(format!("Page check failed: {}", e)))?;
        if !status.is_success() {
            return Err(PublishError::Posting(format!("HTTP {}: {}", status, body)).into());
        }

        let info: PageInfo = serde_json::from_str(&body)
            .map_err(|e| PublishError::Posting(format!("Unexpected page response: {}", e)))?;
        Ok(info.name.unwrap_or(info.id))
    }
}

#[async_trait]
impl Publisher for FacebookPublisher {
    async fn upload_image(&self, path: &Path) -> Result<String> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| PublishError::Upload(format!("Failed to read {}: {}", path.display(), e)))?;

        let part = reqwest::multipart::Part::bytes(data)
            .file_name("image.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| PublishError::Upload(format!("Invalid upload part: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .text("access_token", self.page_token.clone())
            // Stage only; the photo goes live with the feed post
            .text("published", "false")
            .part("source", part);

        let response = self
            .http
            .post(self.endpoint("photos"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| PublishError::Network(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::Network(format!("Upload response unreadable: {}", e)))?;
        if !status.is_success() {
            return Err(PublishError::Upload(format!("HTTP {}: {}", status, body)).into());
        }

        let media: GraphId = serde_json::from_str(&body)
            .map_err(|e| PublishError::Upload(format!("Unexpected upload response: {}", e)))?;
        debug!(media_id = %media.id, "staged photo");
        Ok(media.id)
    }

    async fn publish(&self, text: &str, media_id: Option<&str>) -> Result<String> {
        let mut params: Vec<(String, String)> = vec![
            ("message".to_string(), text.to_string()),
            ("access_token".to_string(), self.page_token.clone()),
        ];
        if let Some(media_id) = media_id {
            params.push((
                "attached_media[0]".to_string(),
                serde_json::json!({ "media_fbid": media_id }).to_string(),
            ));
        }

        let response = self
            .http
            .post(self.endpoint("feed"))
            .form(&params)
            .send()
            .await
            .map_err(|e| PublishError::Network(format!("Feed request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::Network(format!("Feed response unreadable: {}", e)))?;
        if !status.is_success() {
            return Err(PublishError::Posting(format!("HTTP {}: {}", status, body)).into());
        }

        let post: GraphId = serde_json::from_str(&body)
            .map_err(|e| PublishError::Posting(format!("Unexpected feed response: {}", e)))?;
        Ok(post.id)
    }

    fn name(&self) -> &str {
        "facebook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> FacebookPublisher {
        FacebookPublisher::new(&FacebookConfig {
            page_token: "token".to_string(),
            page_id: "123456".to_string(),
            graph_api_base: "https://graph.facebook.com/v18.0/".to_string(),
        })
    }

    #[test]
    fn test_endpoint_building() {
        let publisher = publisher();
        assert_eq!(
            publisher.endpoint("photos"),
            "https://graph.facebook.com/v18.0/123456/photos"
        );
        assert_eq!(
            publisher.endpoint("feed"),
            "https://graph.facebook.com/v18.0/123456/feed"
        );
    }

    #[test]
    fn test_attached_media_encoding() {
        let value = serde_json::json!({ "media_fbid": "424242" }).to_string();
        assert_eq!(value, r#"{"media_fbid":"424242"}"#);
    }

    #[test]
    fn test_graph_id_parsing() {
        let media: GraphId = serde_json::from_str(r#"{"id":"789","post_id":"123_789"}"#).unwrap();
        assert_eq!(media.id, "789");
    }
}
