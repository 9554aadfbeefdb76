//! Error types for Pagecast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PagecastError>;

#[derive(Error, Debug)]
pub enum PagecastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PagecastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PagecastError::InvalidInput(_) => 3,
            PagecastError::Source(SourceError::Authentication(_)) => 2,
            PagecastError::Source(_) => 1,
            PagecastError::Publish(_) => 1,
            PagecastError::Config(_) => 1,
            PagecastError::Io(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Channel resolution failed: {0}")]
    ChannelResolution(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Media download failed: {0}")]
    Download(String),
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Posting failed: {0}")]
    Posting(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = PagecastError::InvalidInput("Empty channel name".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_authentication_error() {
        let source_error = SourceError::Authentication("Session not authorized".to_string());
        let error = PagecastError::Source(source_error);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_channel_resolution_error() {
        let source_error = SourceError::ChannelResolution("No such channel".to_string());
        let error = PagecastError::Source(source_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_publish_error() {
        let publish_error = PublishError::Posting("HTTP 400".to_string());
        let error = PagecastError::Publish(publish_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let config_error = ConfigError::MissingVars(vec!["FACEBOOK_PAGE_ID".to_string()]);
        let error = PagecastError::Config(config_error);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_missing_vars_message_enumerates_names() {
        let error = ConfigError::MissingVars(vec![
            "TELEGRAM_API_ID".to_string(),
            "FACEBOOK_PAGE_TOKEN".to_string(),
        ]);
        let message = format!("{}", error);
        assert_eq!(
            message,
            "Missing required environment variables: TELEGRAM_API_ID, FACEBOOK_PAGE_TOKEN"
        );
    }

    #[test]
    fn test_invalid_value_formatting() {
        let error = ConfigError::Invalid {
            name: "TELEGRAM_API_ID".to_string(),
            reason: "not a number".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Invalid value for TELEGRAM_API_ID: not a number"
        );
    }

    #[test]
    fn test_error_conversion_from_source_error() {
        let source_error = SourceError::Fetch("timeout".to_string());
        let error: PagecastError = source_error.into();
        assert!(matches!(error, PagecastError::Source(_)));
    }

    #[test]
    fn test_error_conversion_from_publish_error() {
        let publish_error = PublishError::Network("connection refused".to_string());
        let error: PagecastError = publish_error.into();
        assert!(matches!(error, PagecastError::Publish(_)));
    }

    #[test]
    fn test_error_message_formatting_upload() {
        let error = PagecastError::Publish(PublishError::Upload("HTTP 500: server error".to_string()));
        assert_eq!(
            format!("{}", error),
            "Publish error: Image upload failed: HTTP 500: server error"
        );
    }

    #[test]
    fn test_exit_code_consistency() {
        let auth1 = PagecastError::Source(SourceError::Authentication("a".to_string()));
        let auth2 = PagecastError::Source(SourceError::Authentication("b".to_string()));
        assert_eq!(auth1.exit_code(), auth2.exit_code());
        assert_eq!(auth1.exit_code(), 2);

        let fetch = PagecastError::Source(SourceError::Fetch("x".to_string()));
        let download = PagecastError::Source(SourceError::Download("x".to_string()));
        assert_eq!(fetch.exit_code(), 1);
        assert_eq!(download.exit_code(), 1);
    }
}
