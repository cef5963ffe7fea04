//! External inventory snapshot models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The only snapshot version the importer accepts
pub const SUPPORTED_SNAPSHOT_VERSION: &str = "1.0";

/// A versioned bulk description of inventory produced by an external tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportSnapshot {
    pub version: String,
    /// Informational only
    #[serde(rename = "generated")]
    pub generated_at: DateTime<Utc>,
    pub items: Vec<ImportItem>,
    /// Size of the payload this snapshot was decoded from
    #[serde(skip)]
    pub byte_size: usize,
}

impl ImportSnapshot {
    pub fn new(version: impl Into<String>, items: Vec<ImportItem>) -> Self {
        Self {
            version: version.into(),
            generated_at: Utc::now(),
            items,
            byte_size: 0,
        }
    }

    pub fn is_supported_version(&self) -> bool {
        self.version == SUPPORTED_SNAPSHOT_VERSION
    }

    /// Summarize the snapshot without touching any inventory
    pub fn preview(&self) -> ImportPreview {
        let mut per_manufacturer_counts = BTreeMap::new();
        for item in &self.items {
            *per_manufacturer_counts
                .entry(item.manufacturer.clone())
                .or_insert(0) += 1;
        }

        ImportPreview {
            version: self.version.clone(),
            item_count: self.items.len(),
            generated_at: self.generated_at,
            byte_size: self.byte_size,
            per_manufacturer_counts,
        }
    }
}

/// One line of a snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportItem {
    /// Stable catalog key (or something the catalog can resolve to one)
    pub code: String,
    pub name: String,
    pub manufacturer: String,
    /// Raw kind label, normalized to `InventoryKind` during import
    pub kind: String,
    /// Integer or decimal in the payload, coerced to `Decimal`
    pub quantity: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ImportItem {
    /// The location, if one was supplied with any visible text
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}

/// What an import would look like before committing it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportPreview {
    pub version: String,
    pub item_count: usize,
    pub generated_at: DateTime<Utc>,
    pub byte_size: usize,
    pub per_manufacturer_counts: BTreeMap<String, usize>,
}
