//! Error types for capability execution.
//!
//! Messages are read by the model, so they are written in Spanish.

use commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur while executing a capability.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Capability not found in registry.
    #[error("Función no encontrada: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Falta el parámetro requerido: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Parámetro inválido '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The store could not answer. `context` is the user-facing summary.
    #[error("{context}")]
    Commerce {
        context: String,
        #[source]
        source: CommerceError,
    },

    /// General execution error.
    #[error("Error de ejecución: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Wrap a store failure with a user-facing summary.
    pub fn commerce(context: impl Into<String>, source: CommerceError) -> Self {
        ToolError::Commerce {
            context: context.into(),
            source,
        }
    }
}
