//! Inventory ledger models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::CatalogKey;

/// One ledger row tracking a quantity of a catalog item for one purpose
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub id: Uuid,
    pub item_key: CatalogKey,
    pub kind: InventoryKind,
    /// Unit-less count of physical units, never negative
    pub quantity: Decimal,
    pub date_added: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl InventoryRecord {
    /// Create a fresh record with a new id and both timestamps set to now
    pub fn new(item_key: CatalogKey, kind: InventoryKind, quantity: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            item_key,
            kind,
            quantity,
            date_added: now,
            date_modified: now,
        }
    }

    /// Set a new quantity and bump the modification time
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
        self.date_modified = Utc::now();
    }
}

/// Input for creating a ledger record; the ledger assigns id and timestamps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewInventoryRecord {
    pub item_key: CatalogKey,
    pub kind: InventoryKind,
    pub quantity: Decimal,
}

impl NewInventoryRecord {
    pub fn new(item_key: CatalogKey, kind: InventoryKind, quantity: Decimal) -> Self {
        Self {
            item_key,
            kind,
            quantity,
        }
    }

    pub fn into_record(self) -> InventoryRecord {
        InventoryRecord::new(self.item_key, self.kind, self.quantity)
    }
}

/// Purpose of a ledger record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InventoryKind {
    OnHand,
    ToBuy,
    ToSell,
}

impl InventoryKind {
    pub const ALL: [InventoryKind; 3] = [
        InventoryKind::OnHand,
        InventoryKind::ToBuy,
        InventoryKind::ToSell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryKind::OnHand => "on_hand",
            InventoryKind::ToBuy => "to_buy",
            InventoryKind::ToSell => "to_sell",
        }
    }
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryKind::OnHand => write!(f, "On Hand"),
            InventoryKind::ToBuy => write!(f, "To Buy"),
            InventoryKind::ToSell => write!(f, "To Sell"),
        }
    }
}

/// Raised when an external kind label matches none of the known kinds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for InventoryKind {
    type Err = ParseKindError;

    /// Accepts the labels external tools emit: "on_hand", "On Hand", "inventory",
    /// "buy", "to-sell", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "on_hand" | "onhand" | "inventory" | "stock" => Ok(InventoryKind::OnHand),
            "to_buy" | "tobuy" | "buy" | "purchase" => Ok(InventoryKind::ToBuy),
            "to_sell" | "tosell" | "sell" => Ok(InventoryKind::ToSell),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Placement of some quantity of an item, kept apart from the records themselves
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationAssignment {
    pub item_key: CatalogKey,
    pub location: String,
    pub quantity: Decimal,
    pub assigned_at: DateTime<Utc>,
}
