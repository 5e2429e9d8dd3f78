//! Core trait and types for chat-model backends.
//!
//! This crate provides the shared interface between the sales orchestrator
//! and the language-model backends it talks to. It defines:
//!
//! - [`ChatModel`] - The trait every model backend implements
//! - [`ChatMessage`] / [`ChatRole`] - The ordered message sequence sent to a model
//! - [`ModelReply`] / [`FunctionCall`] - What a model answers with
//! - [`FunctionSpec`] / [`ToolRequest`] - Capability descriptors and parsed calls
//! - [`BrainError`] - Error types for model operations
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, BrainError, ChatModel, CompletionRequest, ModelReply};
//!
//! struct Parrot;
//!
//! #[async_trait]
//! impl ChatModel for Parrot {
//!     async fn complete(&self, request: CompletionRequest) -> Result<ModelReply, BrainError> {
//!         let last = request
//!             .messages
//!             .last()
//!             .and_then(|m| m.content.clone())
//!             .unwrap_or_default();
//!         Ok(ModelReply::Text(last))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Parrot"
//!     }
//! }
//! ```

mod error;
mod message;
mod model;
mod prompt;
mod tools;

pub use error::BrainError;
pub use message::{ChatMessage, ChatRole, FunctionCall};
pub use model::{ChatModel, CompletionRequest, ModelReply};
pub use prompt::hash_prompt;
pub use tools::{FunctionSpec, ToolRequest};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
