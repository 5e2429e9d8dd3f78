//! Aquabot: Telegram sales assistant for a water-treatment retailer.

mod commands;
mod config;
mod handler;
mod replies;

use std::sync::Arc;

use aquabot_database::Database;
use brain_core::ChatModel;
use commerce::{CommerceClient, WooCommerceClient};
use openai_brain::OpenAiModel;
use orchestrator::{CatalogKnowledge, OrchestratorConfig, SalesOrchestrator};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::BotConfig;
use crate::handler::BotState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BotConfig::from_env()?;

    info!("Opening database at {}", config.database_path);
    let db = Database::open_file(&config.database_path).await?;
    db.migrate().await?;

    let commerce: Arc<dyn CommerceClient> = Arc::new(WooCommerceClient::from_env()?);
    let model: Arc<dyn ChatModel> = Arc::new(OpenAiModel::from_env()?);

    let orchestrator_config = OrchestratorConfig::from_env()?;
    let knowledge = Arc::new(CatalogKnowledge::load(&orchestrator_config.knowledge_dir));
    if knowledge.is_empty() {
        warn!(
            "No catalog knowledge in {}; answers will rely on the store only",
            orchestrator_config.knowledge_dir.display()
        );
    }

    let orchestrator = SalesOrchestrator::new(
        model,
        sales_tools::default_registry(commerce.clone()),
        db.clone(),
        knowledge,
        orchestrator_config,
    );

    let bot = Bot::new(&config.telegram_token);
    let me = bot.get_me().await?;
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    info!(
        "Bot @{} ready for {}",
        me.username(),
        orchestrator.config().business_name
    );

    let state = Arc::new(BotState {
        orchestrator,
        commerce,
        db: db.clone(),
        config,
        bot_username: me.username().to_string(),
    });

    handler::run(bot, state).await;

    info!("Shutting down");
    db.close().await;

    Ok(())
}
