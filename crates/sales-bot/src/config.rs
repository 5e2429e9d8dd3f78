//! Bot configuration from the environment.

use std::env;
use std::time::Duration;

/// Settings for the Telegram front end.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token.
    pub telegram_token: String,
    /// SQLite database file.
    pub database_path: String,
    /// Telegram user allowed to run owner commands.
    pub owner_telegram_id: Option<i64>,
    /// Upper bound for one conversational turn.
    pub turn_timeout: Duration,
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TELEGRAM_BOT_TOKEN` - Bot token from BotFather
    ///
    /// Optional environment variables:
    /// - `DATABASE_PATH` - SQLite file (default: ./data/bot.db)
    /// - `OWNER_TELEGRAM_ID` - Telegram id allowed to use /leads
    /// - `TURN_TIMEOUT_SECS` - Turn timeout (default: 120)
    pub fn from_env() -> Result<Self, String> {
        let telegram_token = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or("TELEGRAM_BOT_TOKEN environment variable is required")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/bot.db".to_string());

        let owner_telegram_id = match env::var("OWNER_TELEGRAM_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| format!("OWNER_TELEGRAM_ID is not a number: {}", raw))?,
            ),
            _ => None,
        };

        let turn_timeout = env::var("TURN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(120));

        Ok(Self {
            telegram_token,
            database_path,
            owner_telegram_id,
            turn_timeout,
        })
    }

    /// Whether `telegram_id` may run owner commands.
    pub fn is_owner(&self, telegram_id: i64) -> bool {
        self.owner_telegram_id == Some(telegram_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_vars() {
            for var in [
                "TELEGRAM_BOT_TOKEN",
                "DATABASE_PATH",
                "OWNER_TELEGRAM_ID",
                "TURN_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        clear_vars();
        let err = BotConfig::from_env().unwrap_err();
        assert!(err.contains("TELEGRAM_BOT_TOKEN"));

        std::env::set_var("TELEGRAM_BOT_TOKEN", "123:abc");
        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.database_path, "./data/bot.db");
        assert_eq!(config.owner_telegram_id, None);
        assert_eq!(config.turn_timeout, Duration::from_secs(120));
        assert!(!config.is_owner(42));

        std::env::set_var("OWNER_TELEGRAM_ID", "42");
        std::env::set_var("TURN_TIMEOUT_SECS", "30");
        std::env::set_var("DATABASE_PATH", "/var/lib/aquabot/bot.db");
        let config = BotConfig::from_env().unwrap();
        assert!(config.is_owner(42));
        assert!(!config.is_owner(43));
        assert_eq!(config.turn_timeout, Duration::from_secs(30));
        assert_eq!(config.database_path, "/var/lib/aquabot/bot.db");

        std::env::set_var("OWNER_TELEGRAM_ID", "dueño");
        assert!(BotConfig::from_env().is_err());

        clear_vars();
    }
}
