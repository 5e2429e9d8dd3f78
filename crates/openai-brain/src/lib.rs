//! OpenAI-backed chat model for the Aquabot sales assistant.
//!
//! This crate implements [`brain_core::ChatModel`] over the OpenAI
//! chat-completions API, including the legacy `functions` /
//! `function_call` fields used for capability calls.
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_brain::OpenAiModel;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = OpenAiModel::from_env()?;
//!     println!("using {}", model.config().model);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::OpenAiModel;
pub use config::{OpenAiBrainConfig, OpenAiBrainConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, BrainError, ChatModel, CompletionRequest, ModelReply};
