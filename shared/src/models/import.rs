//! Import policy, decision and result models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Strategy for resolving conflicts between snapshot items and existing records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Delete every ledger record, then create one per snapshot item
    EraseAndReplace,
    /// Create records for new items, skip conflicting ones
    AddNewOnly,
    /// Create records for new items, add quantity to conflicting ones
    AddAndIncrease,
    /// Ask a decision port for every conflicting item
    AskPerItem,
}

impl ImportPolicy {
    pub const ALL: [ImportPolicy; 4] = [
        ImportPolicy::EraseAndReplace,
        ImportPolicy::AddNewOnly,
        ImportPolicy::AddAndIncrease,
        ImportPolicy::AskPerItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportPolicy::EraseAndReplace => "erase_and_replace",
            ImportPolicy::AddNewOnly => "add_new_only",
            ImportPolicy::AddAndIncrease => "add_and_increase",
            ImportPolicy::AskPerItem => "ask_per_item",
        }
    }
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown import policy '{0}'")]
pub struct ParsePolicyError(pub String);

impl FromStr for ImportPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ImportPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| ParsePolicyError(s.to_string()))
    }
}

/// Answer to a single conflict under `AskPerItem`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ImportDecision {
    Skip,
    Replace,
    Increase,
}

/// A snapshot item that could not be applied
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedItem {
    pub code: String,
    pub error_message: String,
}

/// Outcome of one import run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportResult {
    pub total_items: usize,
    pub success_count: usize,
    pub skipped_count: usize,
    /// Per-item failures, in snapshot order
    pub failed_items: Vec<FailedItem>,
    /// Location assignments that failed after their quantity change was kept.
    /// These are not counted against `total_items`.
    pub location_failures: Vec<FailedItem>,
}

impl ImportResult {
    pub fn new(total_items: usize) -> Self {
        Self {
            total_items,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped_count += 1;
    }

    pub fn record_failure(&mut self, code: impl Into<String>, error_message: impl Into<String>) {
        self.failed_items.push(FailedItem {
            code: code.into(),
            error_message: error_message.into(),
        });
    }

    pub fn record_location_failure(
        &mut self,
        code: impl Into<String>,
        error_message: impl Into<String>,
    ) {
        self.location_failures.push(FailedItem {
            code: code.into(),
            error_message: error_message.into(),
        });
    }

    pub fn failed_count(&self) -> usize {
        self.failed_items.len()
    }

    /// Every item is accounted for exactly once
    pub fn is_balanced(&self) -> bool {
        self.total_items == self.success_count + self.skipped_count + self.failed_items.len()
    }

    /// One-line summary suitable for display
    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} skipped, {} failed",
            self.success_count,
            self.skipped_count,
            self.failed_items.len()
        )
    }
}
