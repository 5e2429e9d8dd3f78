//! The chat-model trait.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::message::{ChatMessage, FunctionCall};
use crate::tools::FunctionSpec;

/// A request for a single model completion.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Ordered message sequence, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Capabilities the model may request. Empty means none are offered.
    pub functions: Vec<FunctionSpec>,
}

impl CompletionRequest {
    /// Request a plain completion with no capabilities offered.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            functions: Vec::new(),
        }
    }

    /// Offer capabilities to the model.
    pub fn with_functions(mut self, functions: Vec<FunctionSpec>) -> Self {
        self.functions = functions;
        self
    }

    /// Whether any capability is offered.
    pub fn offers_functions(&self) -> bool {
        !self.functions.is_empty()
    }
}

/// What the model answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    /// Free text meant for the user. May be empty if the backend sent no content.
    Text(String),
    /// A request to run exactly one capability.
    FunctionCall(FunctionCall),
}

/// Trait implemented by every language-model backend.
///
/// Implementations are stateless with respect to conversations: the caller
/// supplies the full message sequence on every call.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit the request and return the model's reply.
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply, BrainError>;

    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;
}
