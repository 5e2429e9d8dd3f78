//! Main orchestrator implementation.

use std::sync::Arc;
use std::time::Duration;

use aquabot_database::{conversation, product_inquiry, ConversationMessage, Database, MessageRole};
use brain_core::{ChatMessage, ChatModel, CompletionRequest, ModelReply, ToolRequest};
use sales_tools::{CapabilityRegistry, PRODUCT_CAPABILITIES};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::OrchestratorConfig;
use crate::error::{ModelStage, OrchestratorError};
use crate::knowledge::CatalogKnowledge;
use crate::prompt::SystemPrompt;

/// Reply sent when a turn fails for any reason.
pub const FALLBACK_REPLY: &str =
    "Lo siento, hubo un error al procesar tu mensaje. Por favor intenta de nuevo.";

/// Reply used when the model answers with no text.
pub const EMPTY_REPLY: &str = "Lo siento, no pude procesar tu solicitud.";

/// Result of a successful turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Final assistant text, already persisted.
    pub reply: String,
    /// Capability the model invoked, if any.
    pub capability: Option<String>,
}

/// Runs one conversational turn at a time for a user.
///
/// A turn builds the prompt, calls the model with the capability list,
/// executes at most one capability and feeds its result back for a second
/// model call, then persists the user message and the reply together.
pub struct SalesOrchestrator {
    model: Arc<dyn ChatModel>,
    capabilities: CapabilityRegistry,
    db: Database,
    knowledge: Arc<CatalogKnowledge>,
    config: OrchestratorConfig,
}

impl SalesOrchestrator {
    /// Create an orchestrator from its parts.
    pub fn new(
        model: Arc<dyn ChatModel>,
        capabilities: CapabilityRegistry,
        db: Database,
        knowledge: Arc<CatalogKnowledge>,
        config: OrchestratorConfig,
    ) -> Self {
        info!(
            "SalesOrchestrator initialized: model={}, capabilities={}, knowledge documents={} ({})",
            model.name(),
            capabilities.len(),
            knowledge.document_count(),
            knowledge.fingerprint()
        );

        Self {
            model,
            capabilities,
            db,
            knowledge,
            config,
        }
    }

    /// Process one user message and return the persisted reply.
    ///
    /// Nothing is stored when this returns an error.
    pub async fn process_turn(
        &self,
        user_id: i64,
        text: &str,
    ) -> Result<TurnOutcome, OrchestratorError> {
        let draft = self.draft_reply(user_id, text).await?;
        self.commit_turn(user_id, text, draft).await
    }

    /// Process a turn, replying with [`FALLBACK_REPLY`] on any failure.
    pub async fn respond(&self, user_id: i64, text: &str) -> String {
        reply_or_fallback(user_id, self.process_turn(user_id, text).await)
    }

    /// Like [`respond`](Self::respond), but gives up if no reply is ready
    /// after `timeout`.
    ///
    /// Only prompt assembly and the model calls are bounded. A reply that is
    /// ready in time is persisted and returned however long the write takes.
    pub async fn respond_with_timeout(&self, user_id: i64, text: &str, timeout: Duration) -> String {
        let result = match tokio::time::timeout(timeout, self.draft_reply(user_id, text)).await {
            Ok(Ok(draft)) => self.commit_turn(user_id, text, draft).await,
            Ok(Err(e)) => Err(e),
            Err(_) => Err(OrchestratorError::Timeout),
        };

        reply_or_fallback(user_id, result)
    }

    /// Build the prompt and run the model, executing at most one capability.
    /// Writes nothing.
    async fn draft_reply(&self, user_id: i64, text: &str) -> Result<Draft, OrchestratorError> {
        info!("Processing turn for user {}: {} chars", user_id, text.len());

        let mut messages = self.build_messages(user_id, text).await?;

        let request = CompletionRequest::new(messages.clone())
            .with_functions(self.capabilities.function_specs());
        let first = self
            .model
            .complete(request)
            .await
            .map_err(|source| OrchestratorError::Model {
                stage: ModelStage::Initial,
                source,
            })?;

        let call = match first {
            ModelReply::Text(content) => {
                return Ok(Draft {
                    reply: non_empty_reply(content),
                    invocation: None,
                })
            }
            ModelReply::FunctionCall(call) => call,
        };

        let request = ToolRequest::from_call(&call.name, &call.arguments).map_err(|source| {
            OrchestratorError::MalformedCapabilityArguments {
                capability: call.name.clone(),
                source,
            }
        })?;

        info!("Model requested capability: {}", request.name);
        let result = self.capabilities.dispatch_request(request.clone()).await;
        debug!("Capability {} result: {} bytes", request.name, result.to_string().len());

        messages.push(ChatMessage::assistant_function_call(call));
        messages.push(ChatMessage::function_result(&request.name, result.to_string()));

        let second = self
            .model
            .complete(CompletionRequest::new(messages))
            .await
            .map_err(|source| OrchestratorError::Model {
                stage: ModelStage::FollowUp,
                source,
            })?;

        let reply = match second {
            ModelReply::Text(content) => non_empty_reply(content),
            ModelReply::FunctionCall(extra) => {
                warn!(
                    "Ignoring second capability request {} after {}",
                    extra.name, request.name
                );
                EMPTY_REPLY.to_string()
            }
        };

        Ok(Draft {
            reply,
            invocation: Some((request, result)),
        })
    }

    /// Persist the exchange, then record the inquiry and prune history.
    async fn commit_turn(
        &self,
        user_id: i64,
        text: &str,
        draft: Draft,
    ) -> Result<TurnOutcome, OrchestratorError> {
        let Draft { reply, invocation } = draft;

        conversation::append_exchange(self.db.pool(), user_id, text, &reply).await?;

        if let Some((request, result)) = &invocation {
            if PRODUCT_CAPABILITIES.contains(&request.name.as_str()) {
                let subject = inquiry_subject(request, result);
                if let Err(e) = product_inquiry::record_inquiry(
                    self.db.pool(),
                    user_id,
                    &subject,
                    text,
                    Some(&reply),
                )
                .await
                {
                    warn!("Failed to record product inquiry for user {}: {}", user_id, e);
                }
            }
        }

        if let Err(e) =
            conversation::prune_older_than(self.db.pool(), user_id, self.config.history_retention)
                .await
        {
            warn!("Failed to prune history for user {}: {}", user_id, e);
        }

        info!("Generated response: {} chars", reply.len());

        Ok(TurnOutcome {
            reply,
            capability: invocation.map(|(request, _)| request.name),
        })
    }

    /// System prompt for the current instant.
    pub fn system_prompt(&self) -> SystemPrompt {
        SystemPrompt::build(
            &self.config.business_name,
            self.config.timezone,
            &self.capabilities.describe_all(),
            &self.knowledge,
        )
    }

    /// Get the configuration.
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Get the capability registry.
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Get the database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn build_messages(
        &self,
        user_id: i64,
        text: &str,
    ) -> Result<Vec<ChatMessage>, OrchestratorError> {
        let history = conversation::recent_messages(
            self.db.pool(),
            user_id,
            self.config.history_context_messages,
        )
        .await?;

        debug!("Loaded {} history messages for user {}", history.len(), user_id);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt().into_string()));
        messages.extend(history.into_iter().map(history_message));
        messages.push(ChatMessage::user(text));

        Ok(messages)
    }
}

/// A reply that has not been persisted yet.
struct Draft {
    reply: String,
    invocation: Option<(ToolRequest, Value)>,
}

fn reply_or_fallback(user_id: i64, result: Result<TurnOutcome, OrchestratorError>) -> String {
    match result {
        Ok(outcome) => outcome.reply,
        Err(e) => {
            error!("Turn failed for user {}: {}", user_id, e);
            FALLBACK_REPLY.to_string()
        }
    }
}

fn history_message(stored: ConversationMessage) -> ChatMessage {
    match stored.role {
        MessageRole::System => ChatMessage::system(stored.content),
        MessageRole::User => ChatMessage::user(stored.content),
        MessageRole::Assistant => ChatMessage::assistant(stored.content),
    }
}

fn non_empty_reply(content: String) -> String {
    if content.trim().is_empty() {
        EMPTY_REPLY.to_string()
    } else {
        content
    }
}

/// Best label for what the customer asked about.
fn inquiry_subject(request: &ToolRequest, result: &Value) -> String {
    if let Some(name) = result["product"]["name"].as_str() {
        return name.to_string();
    }
    if let Some(query) = request.get_string("query") {
        return query.to_string();
    }
    if let Some(id) = request.get_i64("productId") {
        return format!("Producto #{}", id);
    }
    request.name.clone()
}
