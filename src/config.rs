//! Process configuration, collected from the environment at startup.

use anyhow::{Context, Result};
use teloxide::types::ChatId;

use crate::notify::EmailConfig;

/// How the bot receives updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotMode {
    /// Long polling (default).
    Polling,
    /// Webhook receiver; requires `WEBHOOK_URL`.
    Webhook { url: String, host: String, port: u16 },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub mode: BotMode,
    /// Path of the JSON store; `None` keeps everything in memory.
    pub storage_path: Option<String>,
    /// Optional external catalog file overriding the embedded one.
    pub catalog_path: Option<String>,
    /// Chats that receive a copy of every confirmed application.
    pub broadcast_chats: Vec<ChatId>,
    pub email: Option<EmailConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bot_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;

        let mode = match std::env::var("BOT_MODE").as_deref() {
            Ok("webhook") => BotMode::Webhook {
                url: std::env::var("WEBHOOK_URL")
                    .context("WEBHOOK_URL must be set when BOT_MODE=webhook")?,
                host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            _ => BotMode::Polling,
        };

        let broadcast_chats = std::env::var("BROADCAST_CHAT_IDS")
            .map(|raw| parse_chat_ids(&raw))
            .unwrap_or_default();

        Ok(Self {
            bot_token,
            mode,
            storage_path: std::env::var("STORAGE_PATH").ok(),
            catalog_path: std::env::var("CATALOG_PATH").ok(),
            broadcast_chats,
            email: EmailConfig::from_env(),
        })
    }
}

fn parse_chat_ids(raw: &str) -> Vec<ChatId> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .map(ChatId)
        .collect()
}
