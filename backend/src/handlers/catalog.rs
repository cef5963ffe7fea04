//! HTTP handlers for catalog maintenance

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::AppState;

#[derive(Serialize)]
pub struct CatalogRefreshResponse {
    pub entries: usize,
}

/// Reload the catalog from its backing file
pub async fn refresh_catalog(
    State(state): State<AppState>,
) -> AppResult<Json<CatalogRefreshResponse>> {
    let entries = state.catalog.refresh().await?;
    Ok(Json(CatalogRefreshResponse { entries }))
}
