//! Route definitions for the Flameworker inventory API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/imports", import_routes())
        .nest("/inventory", inventory_routes())
        .nest("/catalog", catalog_routes())
}

/// Snapshot import routes
fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::import_snapshot))
        .route("/preview", post(handlers::preview_import))
}

/// Consolidated inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_inventory))
        .route("/:item_key/locations", get(handlers::get_item_locations))
}

/// Catalog maintenance routes
fn catalog_routes() -> Router<AppState> {
    Router::new().route("/refresh", post(handlers::refresh_catalog))
}
