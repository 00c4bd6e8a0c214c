//! Conversation state kept per chat by the teloxide dialogue storage.
//!
//! One chat has at most one session: either an application draft moving
//! through field collection, review and transfers, or a brigade report with
//! its operation sub-dialog. The state is created on type selection (or
//! report start) and dropped on confirmation, cancellation or finish.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::errors::FlowError;
use crate::flow::application::{ApplicationDraft, TransferTier};
use crate::flow::report::{OperationDraft, ReportDraft};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum DialogueState {
    #[default]
    Idle,
    /// Walking the application field-collection steps, review included;
    /// the draft itself tracks the current step.
    Application {
        draft: ApplicationDraft,
    },
    /// A transfer was requested from review; waiting for the new time.
    AwaitingTransferTime {
        draft: ApplicationDraft,
        tier: TransferTier,
    },
    /// Collecting the report header (brigade, date, site).
    Report {
        draft: ReportDraft,
    },
    /// Report created; offering the operation sub-dialog or finishing.
    ReportMenu {
        report_id: u64,
    },
    /// Walking the 8-step operation sub-dialog for an existing report.
    Operation {
        report_id: u64,
        draft: OperationDraft,
    },
}

impl DialogueState {
    /// The application draft under review, or [`FlowError::NoActiveSession`]
    /// when a review action (confirm, cancel, transfer) arrives out of order.
    pub fn into_reviewing(self) -> Result<ApplicationDraft, FlowError> {
        match self {
            DialogueState::Application { draft }
                if draft.step == crate::flow::application::AppStep::Review =>
            {
                Ok(draft)
            }
            _ => Err(FlowError::NoActiveSession),
        }
    }
}

/// Per-chat dialogue handle backed by in-memory storage.
pub type BotDialogue = Dialogue<DialogueState, InMemStorage<DialogueState>>;
