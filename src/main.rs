use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fieldops_bot::catalog::Catalog;
use fieldops_bot::config::{BotMode, Config};
use fieldops_bot::dialogue::DialogueState;
use fieldops_bot::handlers::{callback_handler, message_handler, AppContext};
use fieldops_bot::localization::init_localization;
use fieldops_bot::notify::Notifier;
use fieldops_bot::storage::Storage;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Field Operations Request Bot");

    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    init_localization()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {path}"))?,
        None => Catalog::embedded().context("embedded catalog is invalid")?,
    };
    info!(types = catalog.len(), "Request catalog loaded");

    let storage = match &config.storage_path {
        Some(path) => Storage::json_file(path)
            .with_context(|| format!("failed to open storage at {path}"))?,
        None => Storage::memory(),
    };

    let bot = Bot::new(&config.bot_token);
    let notifier = Notifier::new(
        bot.clone(),
        config.email.clone(),
        config.broadcast_chats.clone(),
    );

    let ctx = Arc::new(AppContext {
        catalog,
        storage,
        notifier,
    });

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<DialogueState>, DialogueState>()
                .endpoint(message_handler),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<DialogueState>, DialogueState>()
                .endpoint(callback_handler),
        );

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![InMemStorage::<DialogueState>::new(), ctx])
        .enable_ctrlc_handler()
        .build();

    match config.mode {
        BotMode::Polling => {
            info!("Dispatcher starting (long polling)");
            dispatcher.dispatch().await;
        }
        BotMode::Webhook { url, host, port } => {
            let addr = format!("{host}:{port}")
                .parse()
                .context("invalid webhook bind address")?;
            let url = url.parse::<url::Url>().context("invalid WEBHOOK_URL")?;
            info!(%url, %addr, "Dispatcher starting (webhook)");
            let listener = webhooks::axum(bot, webhooks::Options::new(addr, url))
                .await
                .context("failed to start webhook listener")?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    Ok(())
}
