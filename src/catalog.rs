//! Static catalog of request types.
//!
//! Loaded once at startup from an embedded JSON resource (or a file named by
//! `CATALOG_PATH`), never mutated afterwards, and shared read-only across all
//! sessions. Declaration order is display order for both the selection
//! keyboard and the full listing.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Catalog data compiled into the binary; `CATALOG_PATH` overrides it.
const EMBEDDED_CATALOG: &str = include_str!("../data/request_types.json");

/// A submission or confirmation timing rule.
///
/// Numeric rules are checked against the entered execution time; freeform
/// rules are advisory and only ever displayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTime {
    /// Minimum number of hours between submission and execution.
    Hours(u32),
    /// An opaque textual rule, e.g. "до 15:00 предыдущего рабочего дня".
    Rule(String),
}

impl LeadTime {
    pub fn hours(&self) -> Option<u32> {
        match self {
            LeadTime::Hours(n) => Some(*n),
            LeadTime::Rule(_) => None,
        }
    }
}

/// One immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestType {
    pub id: String,
    pub name: String,
    pub submission: LeadTime,
    pub confirmation: LeadTime,
    pub transfer_first_allowed: bool,
    pub transfer_second_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RequestType {
    /// Whether the given transfer tier (1 or 2) is permitted by this type.
    pub fn transfer_allowed(&self, tier: u8) -> bool {
        match tier {
            1 => self.transfer_first_allowed,
            2 => self.transfer_second_allowed,
            _ => false,
        }
    }
}

/// Ordered, read-only table of request types with id lookup.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<RequestType>,
    index: HashMap<String, usize>,
}

impl Catalog {
    fn from_entries(entries: Vec<RequestType>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries, index })
    }

    /// Load the catalog compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        let entries: Vec<RequestType> = serde_json::from_str(EMBEDDED_CATALOG)?;
        Self::from_entries(entries)
    }

    /// Load the catalog from an external JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<RequestType> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    /// Look up a request type by id.
    pub fn lookup(&self, id: &str) -> Result<&RequestType, CatalogError> {
        self.index
            .get(id)
            .map(|&pos| &self.entries[pos])
            .ok_or_else(|| CatalogError::UnknownType(id.to_string()))
    }

    /// All request types in declaration order. Stable across calls.
    pub fn iter(&self) -> impl Iterator<Item = &RequestType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 16);
    }

    #[test]
    fn test_lookup_known_type() {
        let catalog = Catalog::embedded().unwrap();
        let crane = catalog.lookup("5").unwrap();
        assert_eq!(crane.name, "На кран");
        assert_eq!(crane.submission, LeadTime::Hours(24));
        assert_eq!(crane.confirmation, LeadTime::Hours(12));
        assert!(crane.transfer_first_allowed);
        assert!(crane.transfer_second_allowed);
    }

    #[test]
    fn test_lookup_unknown_type_fails() {
        let catalog = Catalog::embedded().unwrap();
        let err = catalog.lookup("99").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownType(ref id) if id == "99"));
    }

    #[test]
    fn test_iteration_order_is_declaration_order() {
        let catalog = Catalog::embedded().unwrap();
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        let expected: Vec<String> = (1..=16).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());

        // Order must be stable across calls.
        let again: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn test_freeform_rules_are_preserved_verbatim() {
        let catalog = Catalog::embedded().unwrap();
        let transport = catalog.lookup("6").unwrap();
        assert_eq!(
            transport.submission,
            LeadTime::Rule("до 15:00 предыдущего рабочего дня".to_string())
        );
        assert!(transport.submission.hours().is_none());
    }

    #[test]
    fn test_transfer_allowed_per_tier() {
        let catalog = Catalog::embedded().unwrap();
        let callout = catalog.lookup("1").unwrap();
        assert!(!callout.transfer_allowed(1));
        assert!(!callout.transfer_allowed(2));

        let pumping = catalog.lookup("3").unwrap();
        assert!(pumping.transfer_allowed(1));
        assert!(!pumping.transfer_allowed(2));

        let bulldozer = catalog.lookup("16").unwrap();
        assert!(bulldozer.transfer_allowed(1));
        assert!(bulldozer.transfer_allowed(2));
        assert!(!bulldozer.transfer_allowed(3));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let raw = r#"[
            {"id": "1", "name": "a", "submission": {"hours": 1}, "confirmation": {"hours": 1},
             "transfer_first_allowed": false, "transfer_second_allowed": false},
            {"id": "1", "name": "b", "submission": {"hours": 1}, "confirmation": {"hours": 1},
             "transfer_first_allowed": false, "transfer_second_allowed": false}
        ]"#;
        let entries: Vec<RequestType> = serde_json::from_str(raw).unwrap();
        let err = Catalog::from_entries(entries).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "1"));
    }
}
