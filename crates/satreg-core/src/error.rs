//! Error types for the registration orchestrator.
//!
//! Every failure surfaced to the front-end is one of these variants; each maps
//! to its own user-facing message instead of a single catch-all string.

use thiserror::Error;

/// Main error type for satreg operations.
#[derive(Debug, Error)]
pub enum SatregError {
    /// Connection, TLS, or timeout failure talking to the upstream API.
    #[error("Request to {url} failed: {message}")]
    Transport {
        url: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The upstream answered, but not with the JSON shape we expected.
    #[error("Unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The upstream answered a listing call with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

/// Result type alias for satreg operations.
pub type Result<T> = std::result::Result<T, SatregError>;

impl SatregError {
    /// Build a transport error from a reqwest failure against `url`.
    pub fn transport(url: &str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("could not connect ({})", err)
        } else {
            err.to_string()
        };
        SatregError::Transport {
            url: url.to_string(),
            message,
            source: Some(err),
        }
    }

    pub fn decode(url: &str, message: impl Into<String>) -> Self {
        SatregError::Decode {
            url: url.to_string(),
            message: message.into(),
        }
    }

    /// Short tag identifying the error class, used in logs and the error page.
    pub fn kind(&self) -> &'static str {
        match self {
            SatregError::Transport { .. } => "transport",
            SatregError::Decode { .. } => "decode",
            SatregError::Status { .. } => "status",
            SatregError::Config { .. } => "config",
            SatregError::Validation { .. } => "validation",
        }
    }

    /// Message shown to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            SatregError::Transport { url, message, .. } => format!(
                "Could not reach the Satellite server at {}: {}",
                url, message
            ),
            SatregError::Decode { url, message } => format!(
                "The Satellite server sent a response that could not be read ({}): {}",
                url, message
            ),
            SatregError::Status { url, status, .. } if *status == 401 || *status == 403 => {
                format!(
                    "The Satellite server rejected the credentials (HTTP {}) for {}",
                    status, url
                )
            }
            SatregError::Status { url, status, body } => format!(
                "The Satellite server returned HTTP {} for {}: {}",
                status, url, body
            ),
            SatregError::Config { message } => format!("Configuration problem: {}", message),
            SatregError::Validation { field, message } => {
                format!("Please check the {} field: {}", field, message)
            }
        }
    }
}
