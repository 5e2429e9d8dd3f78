//! Test doubles for the Aquabot sales assistant.
//!
//! This crate provides:
//! - [`ScriptedModel`] - A `ChatModel` that replays queued replies and records requests
//! - [`DelayedModel`] - Wraps another model with artificial latency
//! - [`MockCommerce`] - An in-memory `CommerceClient` that counts calls and can be made to fail
//!
//! For production use the `openai-brain` and `commerce` crates.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{ChatMessage, ChatModel, CompletionRequest, ModelReply, ScriptedModel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let model = ScriptedModel::new().reply_text("Atendemos de 8am a 5pm.");
//!
//!     let reply = model
//!         .complete(CompletionRequest::new(vec![ChatMessage::user("¿Horarios?")]))
//!         .await?;
//!     assert_eq!(reply, ModelReply::Text("Atendemos de 8am a 5pm.".to_string()));
//!     assert_eq!(model.request_count(), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod scripted;
mod store;

// Re-export brain-core types for convenience
pub use brain_core::{
    async_trait, BrainError, ChatMessage, ChatModel, ChatRole, CompletionRequest, FunctionCall,
    ModelReply,
};

pub use delayed::DelayedModel;
pub use scripted::ScriptedModel;
pub use store::{sample_product, CommerceCall, MockCommerce};
