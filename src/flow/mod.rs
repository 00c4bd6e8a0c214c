//! Conversation flows, decoupled from the Telegram transport.
//!
//! Every transition returns a [`Reply`]: the text to display plus an optional
//! action menu. Handlers translate replies into Telegram messages with inline
//! keyboards; tests drive the flows directly without a bot.

pub mod application;
pub mod report;

/// Callback data understood by the dispatcher. The main-menu values match
/// the buttons the bot has always exposed.
pub mod callback {
    pub const NEW_APPLICATION: &str = "new_application";
    pub const LIST_APPLICATIONS: &str = "list_applications";
    pub const NEW_REPORT: &str = "new_report";
    pub const HELP: &str = "help";
    pub const BACK_TO_MAIN: &str = "back_to_main";

    pub const CONFIRM: &str = "confirm";
    pub const CANCEL: &str = "cancel";
    pub const TRANSFER_FIRST: &str = "transfer_1";
    pub const TRANSFER_SECOND: &str = "transfer_2";

    pub const REPORT_ADD_OPERATION: &str = "report_add_op";
    pub const REPORT_FINISH: &str = "report_done";

    /// Prefix for request-type selection buttons, e.g. `type_5`.
    pub const TYPE_PREFIX: &str = "type_";
}

/// One selectable action offered alongside a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Button label shown to the user.
    pub label: String,
    /// Callback data routed back through the dispatcher.
    pub data: String,
}

impl Action {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// A rendering instruction: message text plus an optional action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub actions: Vec<Action>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_actions(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            text: text.into(),
            actions,
        }
    }

    /// Callback data of the offered actions, in display order.
    pub fn action_data(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.data.as_str()).collect()
    }
}
