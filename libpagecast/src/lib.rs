//! Pagecast - checkpointed channel-to-page relay
//!
//! This library provides the core functionality for polling a Telegram
//! channel and republishing new messages to a Facebook Page, with a local
//! timestamp checkpoint to avoid reposting.

pub mod checkpoint;
pub mod compose;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod pacing;
pub mod pipeline;
pub mod publish;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use checkpoint::CheckpointStore;
pub use config::Config;
pub use error::{PagecastError, Result};
pub use pipeline::Relay;
pub use types::{RunReport, SourceMessage};
