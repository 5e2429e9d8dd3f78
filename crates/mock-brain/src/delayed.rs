//! Delayed model - wraps another model with artificial latency.

use std::time::Duration;

use brain_core::{async_trait, BrainError, ChatModel, CompletionRequest, ModelReply};
use tokio::time::sleep;

/// A model that waits before delegating to the wrapped model.
///
/// Useful for testing turn timeouts.
pub struct DelayedModel<M: ChatModel> {
    inner: M,
    delay: Duration,
}

impl<M: ChatModel> DelayedModel<M> {
    /// Wrap `inner` with the given delay.
    pub fn new(inner: M, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Wrap `inner` with a delay in milliseconds.
    pub fn with_millis(inner: M, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped model.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

#[async_trait]
impl<M: ChatModel> ChatModel for DelayedModel<M> {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply, BrainError> {
        sleep(self.delay).await;
        self.inner.complete(request).await
    }

    fn name(&self) -> &str {
        "DelayedModel"
    }
}
