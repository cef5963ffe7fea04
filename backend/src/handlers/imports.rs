//! HTTP handlers for snapshot import endpoints

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{ImportPolicy, ImportPreview, ImportResult};

use crate::error::AppResult;
use crate::services::SnapshotDecoder;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    pub policy: Option<ImportPolicy>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub policy: ImportPolicy,
    pub summary: String,
    pub result: ImportResult,
}

/// Preview a snapshot without importing it
pub async fn preview_import(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ImportPreview>> {
    let snapshot = SnapshotDecoder::decode(&body)?;
    Ok(Json(state.reconciliation.preview(&snapshot)))
}

/// Import a snapshot under the requested (or configured) policy.
///
/// No decision responder is attached over HTTP, so `ask_per_item` skips
/// every conflict.
pub async fn import_snapshot(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> AppResult<Json<ImportResponse>> {
    let policy = query
        .policy
        .unwrap_or(state.config.import.default_policy);
    let snapshot = SnapshotDecoder::decode(&body)?;

    let result = state
        .reconciliation
        .import(&snapshot, policy, None)
        .await?;

    Ok(Json(ImportResponse {
        policy,
        summary: result.summary(),
        result,
    }))
}
