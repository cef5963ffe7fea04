//! HTTP handlers for consolidated inventory endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    validate_catalog_key, validate_threshold, CatalogKey, ConsolidatedInventoryView,
    InventoryFilter, InventoryKind,
};

use crate::error::{AppError, AppResult};
use crate::services::ItemLocations;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InventoryQuery {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub low_below: Option<Decimal>,
    /// Shorthand for `low_below` at the configured threshold
    #[serde(default)]
    pub low_stock: bool,
}

impl InventoryQuery {
    fn into_filter(self, default_threshold: Decimal) -> AppResult<InventoryFilter> {
        let kind = self
            .kind
            .filter(|k| !k.trim().is_empty())
            .map(|k| k.parse::<InventoryKind>())
            .transpose()
            .map_err(|e| AppError::validation("kind", e.to_string()))?;

        let low_quantity_below = match (self.low_below, self.low_stock) {
            (Some(threshold), _) => Some(threshold),
            (None, true) => Some(default_threshold),
            (None, false) => None,
        };
        if let Some(threshold) = low_quantity_below {
            validate_threshold(threshold).map_err(|e| AppError::validation("low_below", e))?;
        }

        Ok(InventoryFilter {
            search_text: self.search,
            kind,
            low_quantity_below,
        })
    }
}

/// List consolidated inventory, optionally filtered
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
) -> AppResult<Json<Vec<ConsolidatedInventoryView>>> {
    let filter = query.into_filter(state.config.inventory.low_quantity_threshold)?;
    let inventory = state.consolidation.load_filtered(filter).await?;
    Ok(Json(inventory.views().to_vec()))
}

/// Get the location assignments of one item
pub async fn get_item_locations(
    State(state): State<AppState>,
    Path(item_key): Path<String>,
) -> AppResult<Json<ItemLocations>> {
    validate_catalog_key(&item_key).map_err(|e| AppError::validation("item_key", e))?;
    let locations = state
        .consolidation
        .location_summary(&CatalogKey::new(item_key))
        .await?;
    Ok(Json(locations))
}
