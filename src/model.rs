//! Persistent domain records emitted by the conversation flows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a confirmed application. Owned by the storage
/// collaborator once appended; the session that produced it is discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedApplication {
    /// Sequential id allocated by the store at append time.
    pub id: u64,
    pub type_id: String,
    pub type_name: String,
    pub location: String,
    pub brigade: String,
    pub execution_at: NaiveDateTime,
    pub description: String,
    pub address: String,
    /// How many transfer tiers were applied before confirmation.
    pub transfer_count: u8,
    /// Advisory lead-time notice captured at submission, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time_notice: Option<String>,
    /// Telegram chat id of the submitter.
    pub submitted_by: i64,
    pub created_at: NaiveDateTime,
}

/// A single work operation inside a brigade report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub name: String,
    pub request_number: String,
    pub equipment: String,
    pub representative: String,
    pub materials: String,
}

/// A per-brigade field-work log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Global sequential id: count of existing reports + 1.
    pub id: u64,
    /// Per-brigade sequence: max(existing numbers for the brigade) + 1.
    pub number: u64,
    pub brigade: String,
    pub date: NaiveDate,
    pub site: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
    pub created_at: NaiveDateTime,
}
