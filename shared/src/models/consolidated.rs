//! Consolidated per-item inventory views

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatalogIndex, InventoryKind, InventoryRecord};
use crate::types::CatalogKey;

/// Display name used when a ledger item has no catalog entry
pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";

/// Manufacturer used when a ledger item has no catalog entry
pub const UNKNOWN_MANUFACTURER: &str = "Unknown";

/// All ledger records of one catalog item, summed per kind. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsolidatedInventoryView {
    pub item_key: CatalogKey,
    pub catalog_name: String,
    pub manufacturer: String,
    pub total_on_hand: Decimal,
    pub total_to_buy: Decimal,
    pub total_to_sell: Decimal,
    pub source_records: Vec<InventoryRecord>,
}

impl ConsolidatedInventoryView {
    pub fn total_for(&self, kind: InventoryKind) -> Decimal {
        match kind {
            InventoryKind::OnHand => self.total_on_hand,
            InventoryKind::ToBuy => self.total_to_buy,
            InventoryKind::ToSell => self.total_to_sell,
        }
    }

    /// Whether any source record has this kind, regardless of its quantity
    pub fn has_kind(&self, kind: InventoryKind) -> bool {
        self.source_records.iter().any(|r| r.kind == kind)
    }
}

/// Group records by item key and sum quantities per kind.
///
/// Views come back sorted by item key. Items missing from the catalog get the
/// fallback name and manufacturer. Totals too large for a `Decimal` are capped
/// at `Decimal::MAX`.
pub fn consolidate(
    records: &[InventoryRecord],
    catalog: &CatalogIndex,
) -> Vec<ConsolidatedInventoryView> {
    let mut groups: BTreeMap<&CatalogKey, Vec<&InventoryRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(&record.item_key).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(item_key, group)| {
            let mut totals = [Decimal::ZERO; 3];
            for record in &group {
                let slot = match record.kind {
                    InventoryKind::OnHand => 0,
                    InventoryKind::ToBuy => 1,
                    InventoryKind::ToSell => 2,
                };
                // Quantities are never negative; a sum past Decimal::MAX pins there
                totals[slot] = totals[slot].saturating_add(record.quantity);
            }

            let (catalog_name, manufacturer) = match catalog.metadata(item_key.as_str()) {
                Some(metadata) => (metadata.name, metadata.manufacturer),
                None => (
                    UNKNOWN_ITEM_NAME.to_string(),
                    UNKNOWN_MANUFACTURER.to_string(),
                ),
            };

            ConsolidatedInventoryView {
                item_key: item_key.clone(),
                catalog_name,
                manufacturer,
                total_on_hand: totals[0],
                total_to_buy: totals[1],
                total_to_sell: totals[2],
                source_records: group.into_iter().cloned().collect(),
            }
        })
        .collect()
}
