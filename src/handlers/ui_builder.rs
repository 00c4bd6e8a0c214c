//! Keyboards, menus and catalog rendering.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::catalog::Catalog;
use crate::flow::application::describe_type;
use crate::flow::{callback, Action, Reply};
use crate::localization::{t_args_lang, t_lang};
use crate::timefmt;

/// One button per row, in action order.
pub fn keyboard_from_actions(actions: &[Action]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = actions
        .iter()
        .map(|action| {
            vec![InlineKeyboardButton::callback(
                action.label.clone(),
                action.data.clone(),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Send a reply, attaching its action menu when present.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &Reply) -> Result<()> {
    if reply.actions.is_empty() {
        bot.send_message(chat_id, &reply.text).await?;
    } else {
        bot.send_message(chat_id, &reply.text)
            .reply_markup(keyboard_from_actions(&reply.actions))
            .await?;
    }
    Ok(())
}

/// The `/start` greeting with the main action menu.
pub fn main_menu_reply(lang: Option<&str>) -> Reply {
    let text = format!(
        "{}\n\n{}",
        t_lang("welcome-title", lang),
        t_lang("welcome-choose", lang)
    );
    Reply::with_actions(
        text,
        vec![
            Action::new(t_lang("menu-new-application", lang), callback::NEW_APPLICATION),
            Action::new(t_lang("menu-list-types", lang), callback::LIST_APPLICATIONS),
            Action::new(t_lang("menu-new-report", lang), callback::NEW_REPORT),
            Action::new(t_lang("menu-help", lang), callback::HELP),
        ],
    )
}

/// Request-type selection: one button per catalog entry, declaration order.
pub fn type_selection_reply(catalog: &Catalog, lang: Option<&str>) -> Reply {
    let actions = catalog
        .iter()
        .map(|ty| {
            Action::new(
                format!("{}. {}", ty.id, ty.name),
                format!("{}{}", callback::TYPE_PREFIX, ty.id),
            )
        })
        .chain(std::iter::once(Action::new(
            t_lang("back-to-main", lang),
            callback::BACK_TO_MAIN,
        )))
        .collect();
    Reply::with_actions(t_lang("choose-type", lang), actions)
}

/// Full catalog listing with lead-time and transfer rules per type.
pub fn catalog_listing_reply(catalog: &Catalog, lang: Option<&str>) -> Reply {
    let mut blocks = vec![t_lang("types-title", lang)];
    for ty in catalog.iter() {
        blocks.push(describe_type(ty, lang));
    }
    Reply::with_actions(
        blocks.join("\n\n"),
        vec![Action::new(t_lang("back-to-main", lang), callback::BACK_TO_MAIN)],
    )
}

pub fn help_reply(lang: Option<&str>) -> Reply {
    let text = [
        t_lang("help-title", lang),
        t_lang("help-applications", lang),
        t_lang("help-reports", lang),
        t_args_lang(
            "help-formats",
            &[
                ("datetime", timefmt::DATETIME_HINT),
                ("date", timefmt::DATE_HINT),
                ("time", timefmt::TIME_HINT),
            ],
            lang,
        ),
    ]
    .join("\n\n");
    Reply::with_actions(
        text,
        vec![Action::new(t_lang("back-to-main", lang), callback::BACK_TO_MAIN)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::init_localization;

    const LANG: Option<&str> = Some("en");

    fn setup() -> Catalog {
        init_localization().expect("localization init");
        Catalog::embedded().expect("embedded catalog")
    }

    #[test]
    fn test_main_menu_actions() {
        setup();
        let reply = main_menu_reply(LANG);
        assert_eq!(
            reply.action_data(),
            vec![
                callback::NEW_APPLICATION,
                callback::LIST_APPLICATIONS,
                callback::NEW_REPORT,
                callback::HELP,
            ]
        );
    }

    #[test]
    fn test_type_selection_covers_whole_catalog_in_order() {
        let catalog = setup();
        let reply = type_selection_reply(&catalog, LANG);
        // 16 type buttons plus back-to-main.
        assert_eq!(reply.actions.len(), 17);
        assert_eq!(reply.actions[0].data, "type_1");
        assert_eq!(reply.actions[15].data, "type_16");
        assert_eq!(reply.actions[16].data, callback::BACK_TO_MAIN);
    }

    #[test]
    fn test_catalog_listing_mentions_every_type() {
        let catalog = setup();
        let reply = catalog_listing_reply(&catalog, LANG);
        for ty in catalog.iter() {
            assert!(reply.text.contains(&ty.name), "missing {}", ty.name);
        }
    }

    #[test]
    fn test_keyboard_one_button_per_row() {
        setup();
        let actions = vec![Action::new("a", "data_a"), Action::new("b", "data_b")];
        let keyboard = keyboard_from_actions(&actions);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 1);
    }
}
