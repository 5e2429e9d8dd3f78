//! Orchestrator configuration.

use std::env;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::OrchestratorError;

/// Default business name used in the persona.
pub const DEFAULT_BUSINESS_NAME: &str = "Aquaequipos";

/// Default IANA timezone for the date shown to the model.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Guatemala;

/// Settings for [`SalesOrchestrator`](crate::SalesOrchestrator).
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Business name injected into the persona.
    pub business_name: String,

    /// Timezone for the current date and time in the prompt.
    pub timezone: Tz,

    /// Directory holding `*_knowledge.txt` files.
    pub knowledge_dir: PathBuf,

    /// Stored messages sent to the model as context.
    pub history_context_messages: i64,

    /// Stored messages kept per user after each turn.
    pub history_retention: i64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
            timezone: DEFAULT_TIMEZONE,
            knowledge_dir: PathBuf::from("./knowledge"),
            history_context_messages: 10,
            history_retention: 20,
        }
    }
}

impl OrchestratorConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `BUSINESS_NAME` - Business name (default: Aquaequipos)
    /// - `TIMEZONE` - IANA timezone (default: America/Guatemala)
    /// - `KNOWLEDGE_DIR` - Knowledge directory (default: ./knowledge)
    /// - `HISTORY_CONTEXT_MESSAGES` - Messages of context (default: 10)
    /// - `HISTORY_RETENTION` - Messages kept per user (default: 20)
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let defaults = Self::default();

        let business_name = env::var("BUSINESS_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.business_name);

        let timezone = match env::var("TIMEZONE") {
            Ok(name) => name.parse::<Tz>().map_err(|_| {
                OrchestratorError::Configuration(format!("Unknown timezone: {}", name))
            })?,
            Err(_) => defaults.timezone,
        };

        let knowledge_dir = env::var("KNOWLEDGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.knowledge_dir);

        let history_context_messages = env::var("HISTORY_CONTEXT_MESSAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.history_context_messages);

        let history_retention = env::var("HISTORY_RETENTION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.history_retention);

        Self {
            business_name,
            timezone,
            knowledge_dir,
            history_context_messages,
            history_retention,
        }
        .validated()
    }

    /// Set the business name.
    pub fn with_business_name(mut self, name: impl Into<String>) -> Self {
        self.business_name = name.into();
        self
    }

    /// Set the timezone.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the knowledge directory.
    pub fn with_knowledge_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.knowledge_dir = dir.into();
        self
    }

    /// Set the context window and retention limit.
    pub fn with_history(mut self, context_messages: i64, retention: i64) -> Self {
        self.history_context_messages = context_messages;
        self.history_retention = retention;
        self
    }

    fn validated(self) -> Result<Self, OrchestratorError> {
        if self.history_context_messages < 0 {
            return Err(OrchestratorError::Configuration(
                "HISTORY_CONTEXT_MESSAGES must not be negative".to_string(),
            ));
        }
        if self.history_retention < self.history_context_messages {
            return Err(OrchestratorError::Configuration(format!(
                "HISTORY_RETENTION ({}) must be at least HISTORY_CONTEXT_MESSAGES ({})",
                self.history_retention, self.history_context_messages
            )));
        }
        Ok(self)
    }
}
