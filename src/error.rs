// src/error.rs

//! Unified error handling for the competition watcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request to the listing API failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Missing or invalid local configuration or credentials
    #[error("Configuration error: {0}")]
    Config(String),

    /// A remote service rejected (or never received) credentials
    #[error("Authentication failed for {service}: {message}")]
    Auth { service: String, message: String },

    /// Listing API failure other than authentication
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Mail delivery failure other than authentication
    #[error("Transport error: {0}")]
    Transport(String),

    /// A persisted file exists but is not validly structured
    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error for the given service.
    pub fn auth(service: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Auth {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Create an upstream (listing API) error.
    pub fn upstream(message: impl fmt::Display) -> Self {
        Self::Upstream(message.to_string())
    }

    /// Create a mail transport error.
    pub fn transport(message: impl fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }

    /// Create a parse error for a persisted file.
    pub fn parse(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error came from a rejected or missing credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_display() {
        let err = AppError::auth("smtp", "535 bad credentials");
        assert_eq!(
            err.to_string(),
            "Authentication failed for smtp: 535 bad credentials"
        );
        assert!(err.is_auth());
    }

    #[test]
    fn test_parse_display() {
        let err = AppError::parse("sent_competitions.json", "expected value");
        assert_eq!(
            err.to_string(),
            "Failed to parse sent_competitions.json: expected value"
        );
        assert!(!err.is_auth());
    }
}
