//! Configuration management for Pagecast
//!
//! All settings come from the process environment (optionally seeded from a
//! `.env` file), are validated once at startup, and are then held immutable
//! for the run. Nothing reads the environment after `Config::load` returns.

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment variables that must be present for a run
const REQUIRED_VARS: [&str; 6] = [
    "TELEGRAM_API_ID",
    "TELEGRAM_API_HASH",
    "TELEGRAM_PHONE",
    "TELEGRAM_CHANNEL",
    "FACEBOOK_PAGE_TOKEN",
    "FACEBOOK_PAGE_ID",
];

pub const DEFAULT_BATCH_LIMIT: usize = 5;
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub facebook: FacebookConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_id: i32,
    pub api_hash: String,
    pub phone: String,
    /// Channel handle, with or without a leading '@'
    pub channel: String,
    /// Path of the saved MTProto session
    pub session_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FacebookConfig {
    pub page_token: String,
    pub page_id: String,
    /// Graph API base URL, overridable for testing against a local server
    pub graph_api_base: String,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Relay the source text verbatim instead of appending suffix/hashtags
    pub copy_exact: bool,
    pub suffix: String,
    pub hashtags: Vec<String>,
    pub checkpoint_file: PathBuf,
    pub image_dir: PathBuf,
    pub batch_limit: usize,
}

impl Config {
    /// Load configuration from the environment, seeding it from `.env` first
    ///
    /// Every missing required variable is collected and reported in a single
    /// enumerated error so the operator can fix them all at once.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVars` when required variables are absent
    /// and `ConfigError::Invalid` when a value fails to parse.
    pub fn load() -> Result<Self> {
        // A missing .env file is fine; the environment may be set directly.
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from the current process environment
    pub fn from_env() -> Result<Self> {
        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|name| env_var(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing).into());
        }

        let api_id_raw = env_var("TELEGRAM_API_ID").unwrap_or_default();
        let api_id: i32 = api_id_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "TELEGRAM_API_ID".to_string(),
            reason: format!("'{}' is not a number", api_id_raw),
        })?;

        let batch_limit = match env_var("BATCH_LIMIT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "BATCH_LIMIT".to_string(),
                reason: format!("'{}' is not a number", raw),
            })?,
            None => DEFAULT_BATCH_LIMIT,
        };

        Ok(Self {
            telegram: TelegramConfig {
                api_id,
                api_hash: env_var("TELEGRAM_API_HASH").unwrap_or_default(),
                phone: env_var("TELEGRAM_PHONE").unwrap_or_default(),
                channel: env_var("TELEGRAM_CHANNEL").unwrap_or_default(),
                session_file: env_var("TELEGRAM_SESSION")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("pagecast.session")),
            },
            facebook: FacebookConfig {
                page_token: env_var("FACEBOOK_PAGE_TOKEN").unwrap_or_default(),
                page_id: env_var("FACEBOOK_PAGE_ID").unwrap_or_default(),
                graph_api_base: env_var("GRAPH_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GRAPH_API_BASE.to_string()),
            },
            relay: RelayConfig {
                copy_exact: parse_copy_exact(env_var("COPY_EXACT_TEXT")),
                suffix: env_var("POST_SUFFIX").unwrap_or_default(),
                hashtags: parse_hashtags(env_var("HASHTAGS").as_deref().unwrap_or("")),
                checkpoint_file: env_var("CHECKPOINT_FILE")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("last_check_time.txt")),
                image_dir: env_var("IMAGE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("images")),
                batch_limit,
            },
        })
    }
}

/// Read one variable, treating empty values as absent
fn env_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

/// Copy-exact defaults to on; only an explicit "true" keeps it on when set
fn parse_copy_exact(value: Option<String>) -> bool {
    match value {
        Some(v) => v.trim().eq_ignore_ascii_case("true"),
        None => true,
    }
}

/// Split a comma-separated hashtag list, dropping empty entries
fn parse_hashtags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
