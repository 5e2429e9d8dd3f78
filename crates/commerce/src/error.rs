//! Commerce client error types.

use thiserror::Error;

/// Errors that can occur when talking to the store.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Missing or invalid client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request could not be sent or the connection failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The store's payload did not match the expected shape.
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CommerceError {
    /// Whether the store reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommerceError::Status { status: 404, .. })
    }
}
