//! Telegram-facing handlers wired into the dispatcher.
//!
//! The module is split the same way as the conversation itself:
//! - `message_handler`: routes incoming text by dialogue state
//! - `callback_handler`: routes inline-keyboard button presses
//! - `dialogue_manager`: confirm/cancel/finish operations shared by both
//! - `ui_builder`: keyboards, menus and catalog rendering

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

use crate::catalog::Catalog;
use crate::notify::Notifier;
use crate::storage::Storage;

/// Shared collaborators injected into every handler via dptree.
pub struct AppContext {
    pub catalog: Catalog,
    pub storage: Storage,
    pub notifier: Notifier,
}

pub use callback_handler::callback_handler;
pub use message_handler::message_handler;
