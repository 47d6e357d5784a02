//! Kagi client error types

use thiserror::Error;

/// Errors that can occur while talking to the Kagi API
#[derive(Error, Debug)]
pub enum KagiError {
    /// Client could not be constructed from the given configuration
    #[error("Kagi client not configured: {0}")]
    NotConfigured(String),

    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("Kagi request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Kagi API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The payload did not have the expected shape
    #[error("Malformed Kagi response: {0}")]
    Decode(String),
}

impl KagiError {
    /// Create a not-configured error
    pub fn not_configured(msg: impl Into<String>) -> Self {
        Self::NotConfigured(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
