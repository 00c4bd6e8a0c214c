//! Routes inline-keyboard button presses.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, warn};

use crate::dialogue::{BotDialogue, DialogueState};
use crate::flow::application::{self, TransferTier};
use crate::flow::{callback, report};
use crate::localization::{t_args_lang, t_lang};

use super::dialogue_manager::{cancel_application, confirm_application};
use super::ui_builder::{
    catalog_listing_reply, help_reply, main_menu_reply, send_reply, type_selection_reply,
};
use super::AppContext;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: BotDialogue,
    ctx: Arc<AppContext>,
) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("").to_string();
    let lang_owned = q.from.language_code.clone();
    let lang = lang_owned.as_deref();
    debug!(user_id = %q.from.id, data = %data, "Received callback query");

    if let Some(msg) = &q.message {
        let chat_id = msg.chat().id;

        match data.as_str() {
            callback::NEW_APPLICATION => {
                send_reply(&bot, chat_id, &type_selection_reply(&ctx.catalog, lang)).await?;
            }
            callback::LIST_APPLICATIONS => {
                send_reply(&bot, chat_id, &catalog_listing_reply(&ctx.catalog, lang)).await?;
            }
            callback::HELP => {
                send_reply(&bot, chat_id, &help_reply(lang)).await?;
            }
            callback::BACK_TO_MAIN => {
                dialogue.exit().await?;
                send_reply(&bot, chat_id, &main_menu_reply(lang)).await?;
            }

            callback::NEW_REPORT => {
                let (draft, reply) = report::start_report(lang);
                dialogue.update(DialogueState::Report { draft }).await?;
                send_reply(&bot, chat_id, &reply).await?;
            }

            callback::CONFIRM | callback::CANCEL => {
                match dialogue.get().await?.unwrap_or_default().into_reviewing() {
                    Ok(draft) => {
                        if data == callback::CONFIRM {
                            confirm_application(&bot, chat_id, &dialogue, &ctx, draft, lang)
                                .await?;
                        } else {
                            cancel_application(&bot, chat_id, &dialogue, lang).await?;
                        }
                    }
                    Err(_) => {
                        warn!(user_id = %q.from.id, data = %data, "Review action with no active session");
                        bot.send_message(chat_id, t_lang("no-active-session", lang))
                            .await?;
                    }
                }
            }

            callback::TRANSFER_FIRST | callback::TRANSFER_SECOND => {
                let tier = if data == callback::TRANSFER_FIRST {
                    TransferTier::First
                } else {
                    TransferTier::Second
                };
                match dialogue.get().await?.unwrap_or_default().into_reviewing() {
                    Ok(draft) => {
                        let Ok(ty) = ctx.catalog.lookup(&draft.type_id) else {
                            bot.send_message(chat_id, t_lang("no-active-session", lang))
                                .await?;
                            dialogue.exit().await?;
                            bot.answer_callback_query(q.id).await?;
                            return Ok(());
                        };
                        match application::begin_transfer(ty, &draft, tier, lang) {
                            Ok(reply) => {
                                dialogue
                                    .update(DialogueState::AwaitingTransferTime { draft, tier })
                                    .await?;
                                send_reply(&bot, chat_id, &reply).await?;
                            }
                            Err(_) => {
                                bot.send_message(
                                    chat_id,
                                    t_args_lang(
                                        "transfer-unavailable",
                                        &[("tier", tier.index().to_string().as_str())],
                                        lang,
                                    ),
                                )
                                .await?;
                            }
                        }
                    }
                    _ => {
                        bot.send_message(chat_id, t_lang("no-active-session", lang))
                            .await?;
                    }
                }
            }

            callback::REPORT_ADD_OPERATION => {
                match dialogue.get().await?.unwrap_or_default() {
                    DialogueState::ReportMenu { report_id } => {
                        let (draft, reply) = report::start_operation(lang);
                        dialogue
                            .update(DialogueState::Operation { report_id, draft })
                            .await?;
                        send_reply(&bot, chat_id, &reply).await?;
                    }
                    _ => {
                        bot.send_message(chat_id, t_lang("no-active-session", lang))
                            .await?;
                    }
                }
            }
            callback::REPORT_FINISH => match dialogue.get().await?.unwrap_or_default() {
                DialogueState::ReportMenu { .. } => {
                    bot.send_message(chat_id, t_lang("report-finished", lang))
                        .await?;
                    dialogue.exit().await?;
                    send_reply(&bot, chat_id, &main_menu_reply(lang)).await?;
                }
                _ => {
                    bot.send_message(chat_id, t_lang("no-active-session", lang))
                        .await?;
                }
            },

            other if other.starts_with(callback::TYPE_PREFIX) => {
                let type_id = other.trim_start_matches(callback::TYPE_PREFIX);
                match application::start(&ctx.catalog, type_id, lang) {
                    Ok((draft, reply)) => {
                        dialogue.update(DialogueState::Application { draft }).await?;
                        send_reply(&bot, chat_id, &reply).await?;
                    }
                    Err(_) => {
                        bot.send_message(
                            chat_id,
                            t_args_lang("unknown-type", &[("id", type_id)], lang),
                        )
                        .await?;
                        send_reply(&bot, chat_id, &type_selection_reply(&ctx.catalog, lang))
                            .await?;
                    }
                }
            }

            _ => {
                debug!(user_id = %q.from.id, data = %data, "Unhandled callback data");
            }
        }
    }

    // Remove the loading state from the pressed button.
    bot.answer_callback_query(q.id).await?;

    Ok(())
}
