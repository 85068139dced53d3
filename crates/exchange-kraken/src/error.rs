//! Error types for Kraken exchange integration.
//!
//! The caller-facing taxonomy has three layers: `Transport` for HTTP-level
//! failures, `Venue` for errors Kraken reports inside a successful HTTP
//! response, and `Parse` for response shapes the client cannot interpret.
//! The remaining variants cover client-side setup and signing.

use thiserror::Error;

/// Errors that can occur when interacting with Kraken.
#[derive(Debug, Error)]
pub enum KrakenError {
    /// HTTP request completed with a non-success status.
    #[error("transport error: {status_code} - {message}")]
    Transport {
        /// HTTP status code.
        status_code: u16,
        /// Response body or status text.
        message: String,
    },

    /// Kraken reported business-level errors despite HTTP success.
    #[error("venue error: {}", .messages.join("; "))]
    Venue {
        /// Error strings from the response envelope.
        messages: Vec<String>,
    },

    /// Response field was missing or malformed.
    #[error("parse error in {field}: {raw_value}")]
    Parse {
        /// The field that failed to parse.
        field: String,
        /// The offending raw value, truncated.
        raw_value: String,
    },

    /// Network error before any HTTP status was received.
    #[error("network error: {0}")]
    Network(String),

    /// Request timeout.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Request signing failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Longest raw value carried inside a `Parse` error.
const MAX_RAW_VALUE_LEN: usize = 256;

impl KrakenError {
    /// Creates a transport error from status code and message.
    pub fn transport(status_code: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a venue error from the envelope's error list.
    pub fn venue(messages: Vec<String>) -> Self {
        Self::Venue { messages }
    }

    /// Creates a parse error, truncating the raw value.
    pub fn parse(field: impl Into<String>, raw_value: &str) -> Self {
        let raw_value = if raw_value.len() > MAX_RAW_VALUE_LEN {
            let boundary = (0..=MAX_RAW_VALUE_LEN)
                .rev()
                .find(|&i| raw_value.is_char_boundary(i))
                .unwrap_or(0);
            raw_value[..boundary].to_string()
        } else {
            raw_value.to_string()
        };

        Self::Parse {
            field: field.into(),
            raw_value,
        }
    }

    /// Returns true if a later identical request could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Transport { status_code, .. } => *status_code >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for KrakenError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias for Kraken operations.
pub type Result<T> = std::result::Result<T, KrakenError>;
