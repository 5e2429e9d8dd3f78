//! Telegram update handling.

use std::sync::Arc;
use std::time::Duration;

use aquabot_database::{user, Database, User};
use commerce::CommerceClient;
use orchestrator::{SalesOrchestrator, FALLBACK_REPLY};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};

use crate::commands::Command;
use crate::config::BotConfig;
use crate::replies;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Number of products shown by `/destacados`.
const FEATURED_LIMIT: u32 = 5;

/// Everything a handler needs, shared across chats.
pub struct BotState {
    pub orchestrator: SalesOrchestrator,
    pub commerce: Arc<dyn CommerceClient>,
    pub db: Database,
    pub config: BotConfig,
    /// Bot username, used to recognise `/command@bot` forms.
    pub bot_username: String,
}

/// Long-poll Telegram until Ctrl+C.
pub async fn run(bot: Bot, state: Arc<BotState>) {
    info!("starting Telegram long polling as @{}", state.bot_username);

    let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
        let state = state.clone();
        async move {
            if let Err(e) = handle_message(&bot, &msg, &state).await {
                error!(chat_id = msg.chat.id.0, "failed to handle message: {}", e);
            }
            respond(())
        }
    });

    Dispatcher::builder(bot, handler)
        .default_handler(|_| async {}) // Silently ignore non-message updates
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_message(bot: &Bot, msg: &Message, state: &BotState) -> HandlerResult {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    let telegram_id = from.id.0 as i64;

    let customer = match user::find_or_create_user(
        state.db.pool(),
        telegram_id,
        &from.first_name,
        from.last_name.as_deref(),
        from.username.as_deref(),
    )
    .await
    {
        Ok(customer) => customer,
        Err(e) => {
            error!("Failed to register Telegram user {}: {}", telegram_id, e);
            bot.send_message(chat_id, FALLBACK_REPLY).await?;
            return Ok(());
        }
    };

    if msg.photo().is_some() {
        bot.send_message(chat_id, replies::PHOTO_REPLY).await?;
        return Ok(());
    }

    let Some(text) = msg.text() else {
        debug!(msg_id = msg.id.0, "ignoring unsupported message type");
        return Ok(());
    };

    if text.starts_with('/') {
        match Command::parse(text, &state.bot_username) {
            Ok(command) => handle_command(bot, chat_id, state, &customer, command).await?,
            Err(_) => debug!("Ignoring unknown command: {}", text),
        }
        return Ok(());
    }

    pause_typing(bot, chat_id, replies::reading_delay()).await;

    let reply = state
        .orchestrator
        .respond_with_timeout(customer.id, text, state.config.turn_timeout)
        .await;

    pause_typing(bot, chat_id, replies::typing_delay(reply.chars().count())).await;
    send_markdown(bot, chat_id, &reply).await?;

    Ok(())
}

async fn handle_command(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    customer: &User,
    command: Command,
) -> HandlerResult {
    let business_name = &state.orchestrator.config().business_name;
    debug!("Command {:?} from user {}", command, customer.id);

    match command {
        Command::Start => {
            pause_typing(bot, chat_id, Duration::from_millis(2500)).await;
            send_markdown(bot, chat_id, &replies::welcome(&customer.first_name, business_name))
                .await?;
        }
        Command::Help | Command::Ayuda => {
            pause_typing(bot, chat_id, Duration::from_millis(2000)).await;
            send_markdown(bot, chat_id, replies::HELP).await?;
        }
        Command::Productos => {
            pause_typing(bot, chat_id, Duration::from_millis(1800)).await;
            send_markdown(bot, chat_id, replies::SEARCH_HINT).await?;
        }
        Command::Catalogo => {
            pause_typing(bot, chat_id, Duration::from_millis(2200)).await;
            let categories = state.commerce.categories().await.unwrap_or_else(|e| {
                debug!("Showing catalog without categories: {}", e);
                Vec::new()
            });
            send_markdown(bot, chat_id, &replies::catalog_info(business_name, &categories))
                .await?;
        }
        Command::Destacados => {
            pause_typing(bot, chat_id, Duration::from_millis(1500)).await;
            bot.send_message(chat_id, replies::FEATURED_LOOKUP).await?;

            typing(bot, chat_id).await;
            let text = match state.commerce.featured_products(FEATURED_LIMIT).await {
                Ok(products) => replies::featured_listing(&products),
                Err(e) => {
                    warn!("Failed to list featured products: {}", e);
                    replies::FEATURED_ERROR.to_string()
                }
            };
            send_markdown(bot, chat_id, &text).await?;
        }
        Command::Leads => {
            if !state.config.is_owner(customer.external_id) {
                info!("Rejected /leads from non-owner {}", customer.external_id);
                bot.send_message(chat_id, replies::OWNER_ONLY).await?;
                return Ok(());
            }

            let leads = user::list_leads(state.db.pool()).await?;
            send_markdown(bot, chat_id, &replies::leads_listing(&leads)).await?;
        }
    }

    Ok(())
}

async fn typing(bot: &Bot, chat_id: ChatId) {
    if let Err(e) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
        warn!(error = %e, "failed to send typing indicator");
    }
}

async fn pause_typing(bot: &Bot, chat_id: ChatId, delay: Duration) {
    typing(bot, chat_id).await;
    tokio::time::sleep(delay).await;
}

/// Send with legacy Markdown, falling back to plain text if Telegram rejects it.
#[allow(deprecated)]
async fn send_markdown(bot: &Bot, chat_id: ChatId, text: &str) -> ResponseResult<()> {
    match bot
        .send_message(chat_id, text)
        .parse_mode(ParseMode::Markdown)
        .await
    {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(error = %e, "Markdown failed, sending as plain text");
            bot.send_message(chat_id, text).await?;
            Ok(())
        }
    }
}
