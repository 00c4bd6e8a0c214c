//! Error taxonomy shared across the bot.
//!
//! Input-format problems are recoverable (the current step re-prompts) and
//! therefore never abort a conversation turn; everything else is either a
//! user-visible flow error or an isolated collaborator failure.

use thiserror::Error;

/// A date/time entry that does not match the expected literal pattern.
///
/// Always recoverable: the step that produced it re-prompts with the same
/// question instead of failing the turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("input '{input}' does not match pattern '{pattern}'")]
pub struct InputFormatError {
    pub input: String,
    pub pattern: &'static str,
}

/// User-visible conversation flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The selected request-type id is not in the catalog.
    #[error("unknown request type id: {0}")]
    UnknownType(String),

    /// An event (confirm, cancel, transfer) arrived with no session in
    /// progress for this chat.
    #[error("no active session for this chat")]
    NoActiveSession,

    /// Transfer tier is not allowed for the selected type or already used.
    #[error("transfer tier {0} is not available")]
    TransferUnavailable(u8),
}

/// Catalog loading and lookup failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown request type id: {0}")]
    UnknownType(String),

    #[error("duplicate request type id: {0}")]
    DuplicateId(String),

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Persistence collaborator failures. These are surfaced to the user as
/// "application not saved", never silently swallowed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no report with id {0}")]
    ReportNotFound(u64),

    #[error("storage file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Notification collaborator failures. Logged only; one channel failing must
/// never abort the user-facing flow.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("email build error: {0}")]
    Build(String),

    #[error("chat broadcast error: {0}")]
    Broadcast(#[from] teloxide::RequestError),
}
