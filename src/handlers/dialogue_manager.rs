//! Session-ending and store-touching operations shared by the message and
//! callback handlers.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info};

use crate::dialogue::{BotDialogue, DialogueState};
use crate::flow::application::{self, ApplicationDraft};
use crate::flow::report::{self, NewReport};
use crate::localization::{t_args_lang, t_lang};
use crate::model::Operation;
use crate::timefmt;

use super::ui_builder::send_reply;
use super::AppContext;

/// Confirm a reviewed draft: persist, notify, end the session.
///
/// A persistence failure is surfaced as "not saved" and leaves the session
/// in review so the user can retry or cancel.
pub async fn confirm_application(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &BotDialogue,
    ctx: &Arc<AppContext>,
    draft: ApplicationDraft,
    lang: Option<&str>,
) -> Result<()> {
    let Ok(ty) = ctx.catalog.lookup(&draft.type_id) else {
        bot.send_message(chat_id, t_lang("no-active-session", lang))
            .await?;
        dialogue.exit().await?;
        return Ok(());
    };

    let Some(record) = application::finalize(ty, &draft, chat_id.0, timefmt::now_local()) else {
        // A draft can only reach review fully populated; treat anything else
        // as a stale session.
        bot.send_message(chat_id, t_lang("no-active-session", lang))
            .await?;
        dialogue.exit().await?;
        return Ok(());
    };

    match ctx.storage.append_application(record).await {
        Ok(finalized) => {
            info!(
                application_id = finalized.id,
                type_id = %finalized.type_id,
                user_id = %chat_id,
                "Application confirmed"
            );
            ctx.notifier.notify(&finalized).await;
            bot.send_message(
                chat_id,
                t_args_lang(
                    "application-confirmed",
                    &[("id", finalized.id.to_string().as_str())],
                    lang,
                ),
            )
            .await?;
            dialogue.exit().await?;
        }
        Err(err) => {
            error!(user_id = %chat_id, error = %err, "Failed to persist application");
            bot.send_message(chat_id, t_lang("error-not-saved", lang))
                .await?;
            // Session stays in review; the user can retry or cancel.
        }
    }

    Ok(())
}

/// Cancel the current application without side effects.
pub async fn cancel_application(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &BotDialogue,
    lang: Option<&str>,
) -> Result<()> {
    bot.send_message(chat_id, t_lang("application-cancelled", lang))
        .await?;
    dialogue.exit().await?;
    Ok(())
}

/// Append a completed report header, assigning its id and number.
pub async fn create_report(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &BotDialogue,
    ctx: &Arc<AppContext>,
    header: NewReport,
    lang: Option<&str>,
) -> Result<()> {
    match ctx.storage.append_report(header, timefmt::now_local()).await {
        Ok(created) => {
            info!(
                report_id = created.id,
                number = created.number,
                brigade = %created.brigade,
                user_id = %chat_id,
                "Report created"
            );
            send_reply(bot, chat_id, &report::report_created_reply(&created, lang)).await?;
            dialogue
                .update(DialogueState::ReportMenu {
                    report_id: created.id,
                })
                .await?;
        }
        Err(err) => {
            error!(user_id = %chat_id, error = %err, "Failed to persist report");
            bot.send_message(chat_id, t_lang("error-report-not-saved", lang))
                .await?;
            // Session stays on the site step; the user can resend it.
        }
    }
    Ok(())
}

/// Append a completed operation to its report.
pub async fn record_operation(
    bot: &Bot,
    chat_id: ChatId,
    dialogue: &BotDialogue,
    ctx: &Arc<AppContext>,
    report_id: u64,
    operation: Operation,
    lang: Option<&str>,
) -> Result<()> {
    match ctx.storage.append_operation(report_id, operation).await {
        Ok(updated) => {
            send_reply(bot, chat_id, &report::operation_recorded_reply(&updated, lang)).await?;
            dialogue
                .update(DialogueState::ReportMenu { report_id })
                .await?;
        }
        Err(crate::errors::StorageError::ReportNotFound(_)) => {
            error!(user_id = %chat_id, report_id, "Operation for a missing report");
            bot.send_message(chat_id, t_lang("error-report-missing", lang))
                .await?;
            dialogue.exit().await?;
        }
        Err(err) => {
            error!(user_id = %chat_id, error = %err, "Failed to persist operation");
            bot.send_message(chat_id, t_lang("error-report-not-saved", lang))
                .await?;
            // Session stays on the materials step; the user can resend it.
        }
    }
    Ok(())
}
