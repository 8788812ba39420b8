//! Error types for directory lookups.

use thiserror::Error;

/// Errors that can occur while talking to the college directory.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The directory answered with a non-success status.
    #[error("directory returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The response body was not the expected JSON envelope.
    #[error("JSON parse error: {0}")]
    Decode(String),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) | Self::Timeout => {
                "Could not reach the college directory. Please check your connection."
            }
            Self::Status { status, .. } if *status >= 500 => {
                "The college directory is unavailable. Please try again later."
            }
            Self::Status { .. } | Self::Decode(_) => {
                "The college directory returned an unexpected response."
            }
            Self::InvalidBaseUrl { .. } => {
                "The college directory address is not configured correctly."
            }
            Self::Config(_) => "The configuration file could not be read.",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for directory operations.
pub type Result<T> = std::result::Result<T, ClientError>;
