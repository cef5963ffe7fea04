//! Flameworker inventory backend
//!
//! Reconciles external inventory snapshots into a ledger and serves
//! consolidated per-item views of it.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{CatalogService, ConsolidationService, InventoryLedger, ReconciliationService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn InventoryLedger>,
    pub catalog: CatalogService,
    pub reconciliation: ReconciliationService,
    pub consolidation: ConsolidationService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the services around one ledger and one catalog
    pub fn new(ledger: Arc<dyn InventoryLedger>, catalog: CatalogService, config: Config) -> Self {
        Self {
            reconciliation: ReconciliationService::new(ledger.clone(), Arc::new(catalog.clone())),
            consolidation: ConsolidationService::new(ledger.clone(), catalog.clone()),
            ledger,
            catalog,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Snapshot bodies over the configured size are refused with 413
    let body_limit = state.config.import.max_snapshot_bytes;

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Flameworker Inventory API v1.0"
}
