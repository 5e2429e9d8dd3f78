//! Error types for orchestrator operations.

use aquabot_database::DatabaseError;
use brain_core::BrainError;
use thiserror::Error;

/// Model call within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStage {
    /// First call, with capabilities offered.
    Initial,
    /// Second call, after a capability result.
    FollowUp,
}

impl std::fmt::Display for ModelStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelStage::Initial => write!(f, "initial"),
            ModelStage::FollowUp => write!(f, "follow-up"),
        }
    }
}

/// Errors that abort a turn.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The language model call failed.
    #[error("{stage} model call failed: {source}")]
    Model {
        stage: ModelStage,
        #[source]
        source: BrainError,
    },

    /// The model requested a capability with arguments that are not a JSON object.
    #[error("malformed arguments for capability {capability}: {source}")]
    MalformedCapabilityArguments {
        capability: String,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing conversation state failed.
    #[error("storage error: {0}")]
    Storage(#[from] DatabaseError),

    /// The turn did not finish in time.
    #[error("turn timed out")]
    Timeout,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
