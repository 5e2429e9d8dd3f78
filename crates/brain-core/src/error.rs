//! Error types for model operations.

use thiserror::Error;

/// Errors that can occur while talking to a language model.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The backend is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the backend or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The backend answered but the payload could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,
}
