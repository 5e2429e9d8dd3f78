//! Scripted model - replays queued replies in order.

use std::collections::VecDeque;
use std::sync::Mutex;

use brain_core::{async_trait, BrainError, ChatModel, CompletionRequest, FunctionCall, ModelReply};

enum Step {
    Reply(ModelReply),
    Fail(String),
}

/// A model that answers each call with the next scripted step.
///
/// Every request is recorded so tests can inspect what the model was shown.
/// Once the script is exhausted, further calls fail with `ProcessingFailed`.
#[derive(Default)]
pub struct ScriptedModel {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    /// Create a model with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, step: Step) -> Self {
        if let Ok(mut steps) = self.steps.lock() {
            steps.push_back(step);
        }
        self
    }

    /// Queue a text reply.
    pub fn reply_text(self, text: impl Into<String>) -> Self {
        self.push(Step::Reply(ModelReply::Text(text.into())))
    }

    /// Queue a function-call reply with raw JSON arguments.
    pub fn reply_call(self, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        self.push(Step::Reply(ModelReply::FunctionCall(FunctionCall::new(
            name, arguments,
        ))))
    }

    /// Queue a failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.push(Step::Fail(message.into()))
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    /// Number of scripted steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.lock().map(|s| s.len()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply, BrainError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let step = self.steps.lock().ok().and_then(|mut steps| steps.pop_front());
        match step {
            Some(Step::Reply(reply)) => Ok(reply),
            Some(Step::Fail(message)) => Err(BrainError::ProcessingFailed(message)),
            None => Err(BrainError::ProcessingFailed(
                "script exhausted".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "ScriptedModel"
    }
}
