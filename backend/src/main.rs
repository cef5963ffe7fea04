//! Flameworker inventory server
//!
//! Imports snapshots from external inventory tools and serves consolidated
//! views of the glass ledger.

use std::{net::SocketAddr, sync::Arc};

use flameworker::{
    create_app,
    services::{CatalogService, InMemoryLedger},
    AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flameworker=debug,flameworker_server=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Flameworker Inventory Server");
    tracing::info!("Environment: {}", config.environment);

    // Load the catalog
    let catalog = match &config.catalog.path {
        Some(path) => CatalogService::load(path).await?,
        None => {
            tracing::warn!("No catalog configured; every import item will be unresolved");
            CatalogService::empty()
        }
    };

    // Create application state
    let state = AppState::new(Arc::new(InMemoryLedger::new()), catalog, config.clone());

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
