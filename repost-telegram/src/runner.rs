//! Dispatcher runner: converts teloxide messages and button presses to inbound events and passes
//! them to the conversation engine. Registers the bot commands before dispatching.

use anyhow::Result;
use conversation::{ConversationEngine, InMemorySessionStore, Publisher};
use repost_core::{init_tracing, Destination};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, CallbackQuery, Message};
use template_store::JsonTemplateStore;
use tracing::{error, info, instrument, warn};

use crate::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::RepostConfig;

type HandlerResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn teloxide_bot(config: &RepostConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

/// Loads the template store and wires sessions, publisher and engine around `bot`.
#[instrument(skip(config, bot))]
pub async fn build_engine(
    config: &RepostConfig,
    bot: Arc<dyn repost_core::Bot>,
) -> Result<ConversationEngine> {
    let templates = JsonTemplateStore::load(&config.templates_file)
        .await?
        .with_persist_timeout(config.persist_timeout());

    let sessions = match config.session_idle() {
        Some(ttl) => InMemorySessionStore::with_idle_ttl(ttl),
        None => InMemorySessionStore::new(),
    };

    let publisher = Publisher::new(
        bot.clone(),
        Destination::release(config.release_channel_id),
        Destination::reserve(config.reserve_channel_id),
    )
    .with_send_timeout(config.send_timeout());

    Ok(ConversationEngine::new(
        bot,
        Arc::new(templates),
        Arc::new(sessions),
        publisher,
    ))
}

async fn register_commands(bot: &teloxide::Bot) {
    let commands = vec![
        BotCommand::new("templates", "Template menu"),
        BotCommand::new("help", "List of commands"),
        BotCommand::new("cancel", "Abandon the current step"),
    ];
    match bot.set_my_commands(commands).await {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => warn!(error = %e, "Failed to register bot commands"),
    }
}

async fn on_message(msg: Message, engine: Arc<ConversationEngine>) -> HandlerResult {
    let Some(inbound) = TelegramMessageWrapper(&msg).to_inbound() else {
        info!(chat_id = msg.chat.id.0, "Ignoring message without text or video");
        return Ok(());
    };

    info!(
        user_id = inbound.user_id,
        chat_id = inbound.chat.id,
        event = inbound.event.kind(),
        "Received message"
    );

    if let Err(e) = engine.handle(&inbound).await {
        error!(error = %e, user_id = inbound.user_id, "Conversation engine failed");
    }
    Ok(())
}

async fn on_callback(
    bot: teloxide::Bot,
    query: CallbackQuery,
    engine: Arc<ConversationEngine>,
) -> HandlerResult {
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    let Some(inbound) = TelegramCallbackWrapper(&query).to_inbound() else {
        warn!(data = ?query.data, "Ignoring unknown or detached button press");
        return Ok(());
    };

    info!(
        user_id = inbound.user_id,
        chat_id = inbound.chat.id,
        event = inbound.event.kind(),
        "Received button press"
    );

    if let Err(e) = engine.handle(&inbound).await {
        error!(error = %e, user_id = inbound.user_id, "Conversation engine failed");
    }
    Ok(())
}

/// Main entry: validate config, init logging, load templates, register commands, then dispatch
/// updates until interrupted. Updates of one chat are handled in arrival order.
#[instrument(skip(config))]
pub async fn run_bot(config: RepostConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        templates_file = %config.templates_file,
        release_channel_id = config.release_channel_id,
        reserve_channel_id = config.reserve_channel_id,
        "Initializing bot"
    );

    let adapter = Arc::new(TelegramBotAdapter::new(teloxide_bot(&config)));
    let bot = adapter.inner().clone();
    let engine = Arc::new(build_engine(&config, adapter).await?);

    if let Ok(me) = bot.get_me().await {
        info!(username = ?me.user.username, "Connected to Telegram");
    }
    register_commands(&bot).await;

    info!("Bot started successfully");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
