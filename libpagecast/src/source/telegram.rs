//! Telegram channel source
//!
//! Reads channel history over MTProto using grammers with a long-lived
//! session file. The session must already be authorized; first-time sign-in
//! is handled interactively by `pagecast-check`, never by the relay itself.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use grammers_client::types::{Chat, Message};
use grammers_client::{Client, Config as ClientConfig, InitParams};
use grammers_session::Session;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::error::{Result, SourceError};
use crate::source::ChannelSource;
use crate::types::SourceMessage;

/// Telegram implementation of [`ChannelSource`]
pub struct TelegramSource {
    client: Client,
    channel: String,
    /// Raw messages from the last fetch, kept so download_photo can reach
    /// the media reference behind a SourceMessage
    raw: Mutex<HashMap<i32, Message>>,
}

impl TelegramSource {
    /// Connect using the saved session from `config.session_file`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Authentication` when the session cannot be
    /// loaded, the connection fails, or the session is not authorized.
    pub async fn connect(config: &TelegramConfig) -> Result<Self> {
        let session = Session::load_file_or_create(&config.session_file).map_err(|e| {
            SourceError::Authentication(format!(
                "Failed to load session {}: {}",
                config.session_file.display(),
                e
            ))
        })?;

        let client = Client::connect(ClientConfig {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| SourceError::Authentication(format!("Failed to connect to Telegram: {}", e)))?;

        let authorized = client
            .is_authorized()
            .await
            .map_err(|e| SourceError::Authentication(format!("Authorization check failed: {}", e)))?;
        if !authorized {
            return Err(SourceError::Authentication(
                "Telegram session is not authorized; run pagecast-check to sign in".to_string(),
            )
            .into());
        }

        Ok(Self {
            client,
            channel: config.channel.clone(),
            raw: Mutex::new(HashMap::new()),
        })
    }

    /// Resolve the configured channel handle to a chat
    async fn resolve_channel(&self) -> Result<Chat> {
        let handle = self.channel.trim_start_matches('@');
        match self.client.resolve_username(handle).await {
            Ok(Some(chat)) => Ok(chat),
            Ok(None) => Err(SourceError::ChannelResolution(format!(
                "Channel '{}' not found",
                self.channel
            ))
            .into()),
            Err(e) => Err(SourceError::ChannelResolution(format!(
                "Failed to resolve '{}': {}",
                self.channel, e
            ))
            .into()),
        }
    }
}

#[async_trait]
impl ChannelSource for TelegramSource {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<SourceMessage>> {
        let chat = self.resolve_channel().await?;

        let mut iter = self.client.iter_messages(&chat).limit(limit);
        let mut batch = Vec::new();
        let mut raw = HashMap::new();

        while let Some(message) = iter
            .next()
            .await
            .map_err(|e| SourceError::Fetch(format!("History request failed: {}", e)))?
        {
            batch.push(SourceMessage::new(
                message.id(),
                message.date(),
                message.text().to_string(),
                message.photo().is_some(),
            ));
            raw.insert(message.id(), message);
        }

        debug!(channel = %self.channel, fetched = batch.len(), "fetched history batch");

        *self.raw.lock().unwrap_or_else(|e| e.into_inner()) = raw;
        Ok(batch)
    }

    async fn download_photo(&self, message: &SourceMessage, dest: &Path) -> Result<()> {
        let raw = {
            let guard = self.raw.lock().unwrap_or_else(|e| e.into_inner());
            guard.get(&message.id).cloned()
        };
        let raw = raw.ok_or_else(|| {
            SourceError::Download(format!("Message {} is not in the fetched batch", message.id))
        })?;

        let downloaded = raw.download_media(dest).await.map_err(|e| {
            SourceError::Download(format!(
                "Failed to download media of message {}: {}",
                message.id, e
            ))
        })?;
        if !downloaded {
            return Err(SourceError::Download(format!(
                "Message {} has no downloadable media",
                message.id
            ))
            .into());
        }

        debug!(message_id = message.id, dest = %dest.display(), "downloaded photo");
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
