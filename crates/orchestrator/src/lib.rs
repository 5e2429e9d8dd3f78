//! Conversation orchestrator for the Aquabot sales assistant.
//!
//! This crate provides the [`SalesOrchestrator`] type which runs one
//! customer turn end to end: prompt assembly, the function-calling loop
//! against a [`ChatModel`](brain_core::ChatModel), capability dispatch and
//! persistence of the exchange.
//!
//! # Architecture
//!
//! ```text
//! Customer message (from sales-bot)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SALES ORCHESTRATOR                        │
//! │                                                             │
//! │  1. System prompt + last N stored messages + new message    │
//! │         ↓                                                   │
//! │  2. Model call with capabilities offered                    │
//! │         ↓                                                   │
//! │  3. Text? → final reply                                     │
//! │     Function call? → dispatch capability                    │
//! │                      → model call with the result           │
//! │         ↓                                                   │
//! │  4. Persist user message + reply, record inquiry, prune     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orchestrator::{CatalogKnowledge, OrchestratorConfig, SalesOrchestrator};
//!
//! let config = OrchestratorConfig::from_env()?;
//! let knowledge = Arc::new(CatalogKnowledge::load(&config.knowledge_dir));
//! let orchestrator = SalesOrchestrator::new(model, registry, db, knowledge, config);
//!
//! let reply = orchestrator.respond(user.id, "¿Tienen bombas de 1HP?").await;
//! ```

mod config;
mod error;
mod knowledge;
mod orchestrator;
mod prompt;

pub use config::{OrchestratorConfig, DEFAULT_BUSINESS_NAME, DEFAULT_TIMEZONE};
pub use error::{ModelStage, OrchestratorError};
pub use knowledge::{CatalogKnowledge, KNOWLEDGE_SUFFIX};
pub use orchestrator::{SalesOrchestrator, TurnOutcome, EMPTY_REPLY, FALLBACK_REPLY};
pub use prompt::{spanish_long_date, SystemPrompt};
