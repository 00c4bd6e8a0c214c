//! Persistence collaborator: applications and brigade reports.
//!
//! One interface, two backends. The in-memory backend is volatile; the JSON
//! backend keeps the whole store in a flat document that is reloaded at
//! startup and rewritten on every append. All id and number allocation
//! happens under the store mutex, so two chats filing reports at the same
//! time can never observe the same sequence value.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::StorageError;
use crate::flow::application::NewApplication;
use crate::flow::report::NewReport;
use crate::model::{FinalizedApplication, Operation, Report};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    applications: Vec<FinalizedApplication>,
    #[serde(default)]
    reports: Vec<Report>,
}

impl StoreState {
    /// Per-brigade report sequence: max existing number + 1, or 1.
    fn next_report_number(&self, brigade: &str) -> u64 {
        self.reports
            .iter()
            .filter(|report| report.brigade == brigade)
            .map(|report| report.number)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Shared store for finalized applications and reports.
pub struct Storage {
    state: Mutex<StoreState>,
    /// Backing file; `None` keeps the store purely in memory.
    path: Option<PathBuf>,
}

impl Storage {
    /// Volatile in-memory store.
    pub fn memory() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            path: None,
        }
    }

    /// Durable store backed by a flat JSON document. An existing file is
    /// loaded; a missing one starts empty and is created on first append.
    pub fn json_file(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreState::default(),
            Err(err) => return Err(err.into()),
        };
        info!(
            path = %path.display(),
            applications = state.applications.len(),
            reports = state.reports.len(),
            "Storage loaded"
        );
        Ok(Self {
            state: Mutex::new(state),
            path: Some(path),
        })
    }

    /// Append a confirmed application, assigning its sequential id.
    pub async fn append_application(
        &self,
        record: NewApplication,
    ) -> Result<FinalizedApplication, StorageError> {
        let mut state = self.state.lock().await;
        let id = state.applications.len() as u64 + 1;
        let finalized = record.into_finalized(id);
        state.applications.push(finalized.clone());

        if let Err(err) = self.persist(&state).await {
            state.applications.pop();
            return Err(err);
        }
        debug!(application_id = id, "Application appended");
        Ok(finalized)
    }

    /// Append a new report, assigning its global id and per-brigade number.
    pub async fn append_report(
        &self,
        header: NewReport,
        created_at: NaiveDateTime,
    ) -> Result<Report, StorageError> {
        let mut state = self.state.lock().await;
        let report = Report {
            id: state.reports.len() as u64 + 1,
            number: state.next_report_number(&header.brigade),
            brigade: header.brigade,
            date: header.date,
            site: header.site,
            operations: Vec::new(),
            created_at,
        };
        state.reports.push(report.clone());

        if let Err(err) = self.persist(&state).await {
            state.reports.pop();
            return Err(err);
        }
        debug!(report_id = report.id, number = report.number, "Report appended");
        Ok(report)
    }

    /// Append an operation to an existing report.
    pub async fn append_operation(
        &self,
        report_id: u64,
        operation: Operation,
    ) -> Result<Report, StorageError> {
        let mut state = self.state.lock().await;
        let pos = state
            .reports
            .iter()
            .position(|report| report.id == report_id)
            .ok_or(StorageError::ReportNotFound(report_id))?;
        state.reports[pos].operations.push(operation);

        if let Err(err) = self.persist(&state).await {
            state.reports[pos].operations.pop();
            return Err(err);
        }
        Ok(state.reports[pos].clone())
    }

    /// Fetch a report by its global id.
    pub async fn report(&self, report_id: u64) -> Result<Report, StorageError> {
        let state = self.state.lock().await;
        state
            .reports
            .iter()
            .find(|report| report.id == report_id)
            .cloned()
            .ok_or(StorageError::ReportNotFound(report_id))
    }

    pub async fn application_count(&self) -> usize {
        self.state.lock().await.applications.len()
    }

    pub async fn report_count(&self) -> usize {
        self.state.lock().await.reports.len()
    }

    async fn persist(&self, state: &StoreState) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let encoded = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(path, encoded).await?;
        Ok(())
    }
}
