//! WebAssembly module for the Flameworker inventory
//!
//! Provides client-side computation for:
//! - Consolidating ledger records into per-item views
//! - Filtering consolidated views offline
//! - Normalizing kind labels and checking quantities before upload

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Consolidate ledger records (JSON array) against a catalog document
/// (`{"colors": [...]}`), returning the views as a JSON array
#[wasm_bindgen]
pub fn consolidate_inventory(records_json: &str, catalog_json: &str) -> Result<String, JsValue> {
    consolidate_json(records_json, catalog_json).map_err(|e| JsValue::from_str(&e))
}

/// Apply an `InventoryFilter` (JSON) to consolidated views (JSON array)
#[wasm_bindgen]
pub fn filter_inventory(views_json: &str, filter_json: &str) -> Result<String, JsValue> {
    filter_json_views(views_json, filter_json).map_err(|e| JsValue::from_str(&e))
}

/// Normalize an external kind label to its canonical name ("on_hand", ...)
#[wasm_bindgen]
pub fn normalize_kind(label: &str) -> Option<String> {
    label
        .parse::<InventoryKind>()
        .ok()
        .map(|kind| kind.as_str().to_string())
}

/// Check a quantity typed by the user; an empty string means valid
#[wasm_bindgen]
pub fn check_quantity(quantity: &str) -> String {
    match quantity.trim().parse::<Decimal>() {
        Ok(value) => match validate_quantity(value) {
            Ok(()) => String::new(),
            Err(message) => message.to_string(),
        },
        Err(_) => "Quantity must be a number".to_string(),
    }
}

fn consolidate_json(records_json: &str, catalog_json: &str) -> Result<String, String> {
    let records: Vec<InventoryRecord> = serde_json::from_str(records_json)
        .map_err(|e| format!("Invalid records JSON: {}", e))?;

    let catalog = if catalog_json.trim().is_empty() {
        CatalogIndex::default()
    } else {
        CatalogIndex::from_json(catalog_json)
            .map_err(|e| format!("Invalid catalog JSON: {}", e))?
    };

    serde_json::to_string(&consolidate(&records, &catalog)).map_err(|e| e.to_string())
}

fn filter_json_views(views_json: &str, filter_json: &str) -> Result<String, String> {
    let views: Vec<ConsolidatedInventoryView> = serde_json::from_str(views_json)
        .map_err(|e| format!("Invalid views JSON: {}", e))?;
    let filter: InventoryFilter = serde_json::from_str(filter_json)
        .map_err(|e| format!("Invalid filter JSON: {}", e))?;

    serde_json::to_string(&filter.apply(&views)).map_err(|e| e.to_string())
}
