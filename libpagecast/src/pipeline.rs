//! The checkpointed polling-and-relay pipeline
//!
//! One [`Relay::run`] performs a single linear pass: read the checkpoint,
//! fetch the recent batch from the source, filter to new messages, publish
//! each one (text plus optional image) to the destination, and advance the
//! checkpoint. Per-message failures are logged and dropped; the batch keeps
//! going. Source failures abort the run and leave the checkpoint untouched
//! so the next run retries the same window.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{info, warn};

use crate::checkpoint::CheckpointStore;
use crate::compose::{ascii_preview, build_text};
use crate::config::RelayConfig;
use crate::error::Result;
use crate::filter::select_new;
use crate::pacing::Pacing;
use crate::publish::Publisher;
use crate::source::ChannelSource;
use crate::types::{RunReport, SourceMessage};

/// One-shot relay from a source channel to a destination feed
pub struct Relay {
    source: Box<dyn ChannelSource>,
    publisher: Box<dyn Publisher>,
    checkpoint: CheckpointStore,
    config: RelayConfig,
    pacing: Pacing,
}

impl Relay {
    pub fn new(
        source: Box<dyn ChannelSource>,
        publisher: Box<dyn Publisher>,
        config: RelayConfig,
    ) -> Self {
        Self {
            source,
            publisher,
            checkpoint: CheckpointStore::new(config.checkpoint_file.clone()),
            config,
            pacing: Pacing::default(),
        }
    }

    /// Replace the inter-post pacing (tests use a near-zero range)
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Execute one relay run
    ///
    /// # Errors
    ///
    /// Propagates source fetch/auth/resolution failures and checkpoint write
    /// failures. Per-message publish failures are not errors; they are
    /// counted in the returned [`RunReport`].
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        let cutoff = self.checkpoint.read();
        info!(
            source = self.source.name(),
            destination = self.publisher.name(),
            cutoff = %cutoff.to_rfc3339(),
            "looking for messages newer than checkpoint"
        );

        // A fetch failure propagates before the checkpoint is touched; the
        // next run retries the same window instead of silently skipping it.
        let batch = self.source.fetch_recent(self.config.batch_limit).await?;
        report.fetched = batch.len();

        let selected = select_new(&batch, cutoff);
        report.selected = selected.len();

        if selected.is_empty() {
            info!("no new messages found");
        } else if selected.iter().any(|m| m.has_photo) {
            std::fs::create_dir_all(&self.config.image_dir)?;
        }

        let mut attempted = 0usize;
        for message in &selected {
            if message.is_text_empty() {
                info!(message_id = message.id, "message has no text, skipping");
                report.skipped_no_text += 1;
                continue;
            }

            if attempted > 0 {
                self.pacing.pause().await;
            }
            attempted += 1;

            self.relay_message(message, &mut report).await;
        }

        let now = Utc::now();
        self.checkpoint.write(now)?;
        report.checkpoint = Some(now);

        info!(
            fetched = report.fetched,
            selected = report.selected,
            published = report.published,
            failed = report.failed,
            skipped = report.skipped_no_text,
            "run complete"
        );
        Ok(report)
    }

    /// Publish a single message; failures are logged and counted, not raised
    async fn relay_message(&self, message: &SourceMessage, report: &mut RunReport) {
        info!(
            message_id = message.id,
            preview = %ascii_preview(&message.text, 50),
            "processing message"
        );

        let text = build_text(
            &message.text,
            self.config.copy_exact,
            &self.config.suffix,
            &self.config.hashtags,
        );

        let image_path = if message.has_photo {
            self.fetch_image(message).await
        } else {
            None
        };

        // Upload failure degrades the post to text-only rather than dropping it.
        let media_id = match &image_path {
            Some(path) => match self.publisher.upload_image(path).await {
                Ok(media_id) => Some(media_id),
                Err(e) => {
                    warn!(message_id = message.id, error = %e, "image upload failed, posting text only");
                    None
                }
            },
            None => None,
        };

        match self.publisher.publish(&text, media_id.as_deref()).await {
            Ok(post_id) => {
                info!(message_id = message.id, post_id = %post_id, "published");
                report.published += 1;
            }
            Err(e) => {
                warn!(message_id = message.id, error = %e, "publish failed, message dropped");
                report.failed += 1;
            }
        }

        // The download only exists to feed the upload; remove it either way.
        if let Some(path) = image_path {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove downloaded image");
            }
        }
    }

    /// Download the message's photo, returning its local path
    async fn fetch_image(&self, message: &SourceMessage) -> Option<PathBuf> {
        let dest = self.config.image_dir.join(format!("msg_{}.jpg", message.id));
        match self.source.download_photo(message, &dest).await {
            Ok(()) => Some(dest),
            Err(e) => {
                warn!(message_id = message.id, error = %e, "image download failed, posting text only");
                None
            }
        }
    }
}
