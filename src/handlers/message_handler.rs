//! Routes incoming text messages by dialogue state.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::debug;

use crate::dialogue::{BotDialogue, DialogueState};
use crate::flow::application::{self, AppStep};
use crate::flow::report::{self, OperationProgress, ReportProgress};
use crate::localization::t_lang;
use crate::timefmt;

use super::dialogue_manager::{
    cancel_application, confirm_application, create_report, record_operation,
};
use super::ui_builder::{help_reply, main_menu_reply, send_reply};
use super::AppContext;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: BotDialogue,
    ctx: Arc<AppContext>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        // Photos, stickers and the like have no place in this bot.
        let lang = language_of(&msg);
        bot.send_message(msg.chat.id, t_lang("text-hint", lang.as_deref()))
            .await?;
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let lang_owned = language_of(&msg);
    let lang = lang_owned.as_deref();
    debug!(user_id = %chat_id, message_length = text.len(), "Received text message");

    // Commands reset whatever was in progress; an explicit "start over".
    if text == "/start" {
        dialogue.exit().await?;
        send_reply(&bot, chat_id, &main_menu_reply(lang)).await?;
        return Ok(());
    }
    if text == "/help" {
        send_reply(&bot, chat_id, &help_reply(lang)).await?;
        return Ok(());
    }

    let state = dialogue.get().await?.unwrap_or_default();
    match state {
        DialogueState::Idle => {
            bot.send_message(chat_id, t_lang("text-hint", lang)).await?;
        }

        DialogueState::Application { mut draft } => {
            if draft.step == AppStep::Review {
                // Text shortcuts alongside the buttons.
                match text.trim().to_lowercase().as_str() {
                    "confirm" | "ok" | "yes" | "save" => {
                        return confirm_application(&bot, chat_id, &dialogue, &ctx, draft, lang)
                            .await;
                    }
                    "cancel" | "stop" => {
                        return cancel_application(&bot, chat_id, &dialogue, lang).await;
                    }
                    _ => {}
                }
            }

            let reply = application::submit_field(
                &ctx.catalog,
                &mut draft,
                text,
                timefmt::now_local(),
                lang,
            );
            dialogue.update(DialogueState::Application { draft }).await?;
            send_reply(&bot, chat_id, &reply).await?;
        }

        DialogueState::AwaitingTransferTime { mut draft, tier } => {
            let Ok(ty) = ctx.catalog.lookup(&draft.type_id) else {
                bot.send_message(chat_id, t_lang("no-active-session", lang))
                    .await?;
                dialogue.exit().await?;
                return Ok(());
            };
            let outcome = application::apply_transfer(ty, &mut draft, tier, text, lang);
            if outcome.applied {
                dialogue.update(DialogueState::Application { draft }).await?;
            } else {
                dialogue
                    .update(DialogueState::AwaitingTransferTime { draft, tier })
                    .await?;
            }
            send_reply(&bot, chat_id, &outcome.reply).await?;
        }

        DialogueState::Report { mut draft } => match report::submit_report_field(
            &mut draft, text, lang,
        ) {
            ReportProgress::Prompt(reply) => {
                dialogue.update(DialogueState::Report { draft }).await?;
                send_reply(&bot, chat_id, &reply).await?;
            }
            ReportProgress::Complete(header) => {
                create_report(&bot, chat_id, &dialogue, &ctx, header, lang).await?;
            }
        },

        DialogueState::ReportMenu { report_id: _ } => {
            // Only the buttons drive this state; repeat the menu.
            let reply = crate::flow::Reply::with_actions(
                t_lang("report-next", lang),
                report::report_menu_actions(lang),
            );
            send_reply(&bot, chat_id, &reply).await?;
        }

        DialogueState::Operation {
            report_id,
            mut draft,
        } => match report::submit_operation_field(&mut draft, text, lang) {
            OperationProgress::Prompt(reply) => {
                dialogue
                    .update(DialogueState::Operation { report_id, draft })
                    .await?;
                send_reply(&bot, chat_id, &reply).await?;
            }
            OperationProgress::Complete(operation) => {
                record_operation(&bot, chat_id, &dialogue, &ctx, report_id, operation, lang)
                    .await?;
            }
        },
    }

    Ok(())
}

fn language_of(msg: &Message) -> Option<String> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.clone())
}
