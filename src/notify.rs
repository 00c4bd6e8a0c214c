//! Notification fan-out for confirmed applications.
//!
//! Two channels: SMTP email via `lettre` and Telegram broadcast chats.
//! Both are optional; a failure on either channel is logged and never
//! reaches the user-facing flow.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use teloxide::prelude::*;
use tracing::{error, info, warn};

use crate::errors::NotifyError;
use crate::model::FinalizedApplication;
use crate::timefmt;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    pub to_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Returns `None` when `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let smtp_host = var("SMTP_HOST")?;
        Some(Self {
            smtp_host,
            smtp_port: var("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: var("SMTP_FROM")
                .unwrap_or_else(|| "noreply@fieldops.local".to_string()),
            to_address: var("SMTP_TO")
                .unwrap_or_else(|| "dispatcher@fieldops.local".to_string()),
            smtp_user: var("SMTP_USER"),
            smtp_password: var("SMTP_PASSWORD"),
        })
    }
}

/// Fans a confirmed application out to email and broadcast chats.
pub struct Notifier {
    bot: Bot,
    email: Option<EmailConfig>,
    broadcast_chats: Vec<ChatId>,
}

impl Notifier {
    pub fn new(bot: Bot, email: Option<EmailConfig>, broadcast_chats: Vec<ChatId>) -> Self {
        Self {
            bot,
            email,
            broadcast_chats,
        }
    }

    /// Deliver on every configured channel. Failures are logged per channel;
    /// this never returns an error to the caller.
    pub async fn notify(&self, application: &FinalizedApplication) {
        if let Some(config) = &self.email {
            match send_email(config, application).await {
                Ok(()) => info!(application_id = application.id, "Email notification sent"),
                Err(err) => {
                    error!(application_id = application.id, error = %err, "Email notification failed")
                }
            }
        }

        let text = broadcast_text(application);
        for chat_id in &self.broadcast_chats {
            if let Err(err) = self.bot.send_message(*chat_id, &text).await {
                warn!(chat_id = %chat_id, error = %err, "Broadcast notification failed");
            }
        }
    }
}

async fn send_email(
    config: &EmailConfig,
    application: &FinalizedApplication,
) -> Result<(), NotifyError> {
    let email = Message::builder()
        .from(config.from_address.parse()?)
        .to(config.to_address.parse()?)
        .subject(format!(
            "Заявка № {}: {}",
            application.id, application.type_name
        ))
        .header(ContentType::TEXT_PLAIN)
        .body(broadcast_text(application))
        .map_err(|e| NotifyError::Build(e.to_string()))?;

    let mut builder =
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
    if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
        builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
    }
    let mailer = builder.build();

    mailer.send(email).await?;
    Ok(())
}

/// Plain-text rendering shared by the email body and chat broadcasts.
fn broadcast_text(application: &FinalizedApplication) -> String {
    let mut lines = vec![
        format!("Заявка № {}", application.id),
        format!("Тип: {}", application.type_name),
        format!("Месторождение и скважина: {}", application.location),
        format!("Бригада: {}", application.brigade),
        format!(
            "Время исполнения: {}",
            timefmt::format_datetime(application.execution_at)
        ),
        format!("Описание: {}", application.description),
        format!("Адрес подачи: {}", application.address),
    ];
    if application.transfer_count > 0 {
        lines.push(format!("Переносов: {}", application.transfer_count));
    }
    if let Some(notice) = &application.lead_time_notice {
        lines.push(notice.clone());
    }
    lines.push(format!(
        "Подана: {} (chat {})",
        timefmt::format_datetime(application.created_at),
        application.submitted_by
    ));
    lines.join("\n")
}
