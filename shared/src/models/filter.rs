//! Search and filtering over consolidated inventory views

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{consolidate, CatalogIndex, ConsolidatedInventoryView, InventoryKind, InventoryRecord};

/// Composable filter; every active criterion must pass
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InventoryFilter {
    /// Case-insensitive substring over item key, catalog name and manufacturer
    #[serde(default)]
    pub search_text: Option<String>,
    /// Keep views with at least one record of this kind
    #[serde(default)]
    pub kind: Option<InventoryKind>,
    /// Keep views whose on-hand total is strictly below this
    #[serde(default)]
    pub low_quantity_below: Option<Decimal>,
}

impl InventoryFilter {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.kind.is_none() && self.low_quantity_below.is_none()
    }

    /// Lowercased search text, or `None` when blank
    fn search_term(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, view: &ConsolidatedInventoryView) -> bool {
        self.matches_term(view, self.search_term().as_deref())
    }

    fn matches_term(&self, view: &ConsolidatedInventoryView, term: Option<&str>) -> bool {
        if let Some(term) = term {
            let hit = [
                view.item_key.as_str(),
                view.catalog_name.as_str(),
                view.manufacturer.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if !view.has_kind(kind) {
                return false;
            }
        }

        if let Some(threshold) = self.low_quantity_below {
            if view.total_on_hand >= threshold {
                return false;
            }
        }

        true
    }

    /// Apply text, then kind, then low-quantity filtering, preserving order
    pub fn apply(&self, views: &[ConsolidatedInventoryView]) -> Vec<ConsolidatedInventoryView> {
        let term = self.search_term();
        views
            .iter()
            .filter(|view| self.matches_term(view, term.as_deref()))
            .cloned()
            .collect()
    }
}

/// The full consolidated list plus the currently active filter.
///
/// Clearing filters goes back to the retained list; it never re-reads the ledger.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedInventory {
    all: Vec<ConsolidatedInventoryView>,
    filter: InventoryFilter,
    visible: Vec<ConsolidatedInventoryView>,
}

impl ConsolidatedInventory {
    pub fn new(views: Vec<ConsolidatedInventoryView>) -> Self {
        Self {
            visible: views.clone(),
            all: views,
            filter: InventoryFilter::default(),
        }
    }

    pub fn from_records(records: &[InventoryRecord], catalog: &CatalogIndex) -> Self {
        Self::new(consolidate(records, catalog))
    }

    /// Views passing the active filter
    pub fn views(&self) -> &[ConsolidatedInventoryView] {
        &self.visible
    }

    /// Every consolidated view, ignoring the filter
    pub fn all_views(&self) -> &[ConsolidatedInventoryView] {
        &self.all
    }

    pub fn filter(&self) -> &InventoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: InventoryFilter) {
        self.filter = filter;
        self.refresh();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = Some(text.into());
        self.refresh();
    }

    pub fn set_kind_filter(&mut self, kind: Option<InventoryKind>) {
        self.filter.kind = kind;
        self.refresh();
    }

    pub fn set_low_quantity_threshold(&mut self, threshold: Option<Decimal>) {
        self.filter.low_quantity_below = threshold;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filter = InventoryFilter::default();
        self.visible = self.all.clone();
    }

    fn refresh(&mut self) {
        self.visible = self.filter.apply(&self.all);
    }
}
