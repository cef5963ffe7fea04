//! HTTP request handlers

pub mod catalog;
pub mod health;
pub mod imports;
pub mod inventory;

pub use catalog::refresh_catalog;
pub use health::health_check;
pub use imports::{import_snapshot, preview_import};
pub use inventory::{get_item_locations, list_inventory};
