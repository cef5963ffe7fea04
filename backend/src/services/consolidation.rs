//! Consolidated inventory service

use std::sync::Arc;

use serde::Serialize;
use shared::{
    CatalogKey, ConsolidatedInventory, InventoryFilter, LocationAssignment, UNKNOWN_ITEM_NAME,
    UNKNOWN_MANUFACTURER,
};

use crate::error::{AppError, AppResult};
use crate::services::catalog::{CatalogLookup, CatalogService};
use crate::services::ledger::InventoryLedger;

/// Builds consolidated views from the ledger and the current catalog
#[derive(Clone)]
pub struct ConsolidationService {
    ledger: Arc<dyn InventoryLedger>,
    catalog: CatalogService,
}

/// Where one item's stock is kept
#[derive(Debug, Clone, Serialize)]
pub struct ItemLocations {
    pub item_key: CatalogKey,
    pub name: String,
    pub manufacturer: String,
    pub locations: Vec<LocationAssignment>,
}

impl ConsolidationService {
    pub fn new(ledger: Arc<dyn InventoryLedger>, catalog: CatalogService) -> Self {
        Self { ledger, catalog }
    }

    /// Consolidate every ledger record with no filter applied
    pub async fn load(&self) -> AppResult<ConsolidatedInventory> {
        let records = self.ledger.query_all().await?;
        let catalog = self.catalog.snapshot().await;

        let inventory = ConsolidatedInventory::from_records(&records, &catalog);
        tracing::debug!(
            "Consolidated {} records into {} items",
            records.len(),
            inventory.all_views().len()
        );
        Ok(inventory)
    }

    pub async fn load_filtered(&self, filter: InventoryFilter) -> AppResult<ConsolidatedInventory> {
        let mut inventory = self.load().await?;
        inventory.set_filter(filter);
        Ok(inventory)
    }

    /// Location assignments of one item, with its display metadata
    pub async fn location_summary(&self, item_key: &CatalogKey) -> AppResult<ItemLocations> {
        let locations = self.ledger.query_locations(item_key).await?;
        let metadata = self.catalog.lookup_metadata(item_key).await?;

        if metadata.is_none() && locations.is_empty() {
            let records = self.ledger.query_by_item(item_key).await?;
            if records.is_empty() {
                return Err(AppError::NotFound(format!("Item {}", item_key)));
            }
        }

        let (name, manufacturer) = match metadata {
            Some(metadata) => (metadata.name, metadata.manufacturer),
            None => (
                UNKNOWN_ITEM_NAME.to_string(),
                UNKNOWN_MANUFACTURER.to_string(),
            ),
        };

        Ok(ItemLocations {
            item_key: item_key.clone(),
            name,
            manufacturer,
            locations,
        })
    }
}
