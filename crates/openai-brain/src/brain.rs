//! OpenAiModel implementation using the chat-completions API.

use brain_core::{async_trait, BrainError, ChatModel, CompletionRequest, ModelReply};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenAiBrainConfig;

/// A chat model backed by OpenAI's chat-completions endpoint.
///
/// The model is stateless: every call carries the full message list, and the
/// caller decides which functions to offer.
pub struct OpenAiModel {
    client: Client,
    config: OpenAiBrainConfig,
}

impl OpenAiModel {
    /// Create a new OpenAiModel with the given configuration.
    pub fn new(config: OpenAiBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.trim().is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "OpenAiModel initialized with model: {}, timeout: {:?}",
            config.model, config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiModel from environment variables.
    ///
    /// See [`OpenAiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(OpenAiBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiBrainConfig {
        &self.config
    }

    /// Make a chat completion request to the OpenAI API.
    async fn chat_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let offers_functions = request.offers_functions();
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            functions: offers_functions.then_some(request.functions.as_slice()),
            function_call: offers_functions.then_some("auto"),
        };

        debug!(
            "Sending {} messages to OpenAI ({} functions offered)",
            request.messages.len(),
            request.functions.len()
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                BrainError::Timeout
            } else {
                BrainError::Network(format!("Failed to read response: {}", e))
            }
        })?;

        if !status.is_success() {
            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&text) {
                return Err(BrainError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                text
            )));
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| BrainError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "OpenAI usage for {}: prompt={}, completion={}, total={}",
                completion.model, usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }
}

#[async_trait]
impl ChatModel for OpenAiModel {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply, BrainError> {
        let completion = self.chat_completion(&request).await?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BrainError::InvalidResponse("No choices in response".to_string()))?;

        debug!("Completion finished: {:?}", choice.finish_reason);

        match choice.message.function_call {
            Some(call) => Ok(ModelReply::FunctionCall(call)),
            None => Ok(ModelReply::Text(choice.message.content.unwrap_or_default())),
        }
    }

    fn name(&self) -> &str {
        "OpenAiModel"
    }
}
