//! In-process HTTP tests
//!
//! The router is driven with `tower::ServiceExt::oneshot`; no socket is bound.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::*;
use flameworker::{create_app, services::InMemoryLedger, AppState, Config};
use serde_json::Value;
use shared::InventoryKind;
use tower::ServiceExt;

fn app_with(ledger: InMemoryLedger, config: Config) -> Router {
    create_app(AppState::new(Arc::new(ledger), catalog(), config))
}

fn app() -> Router {
    app_with(InMemoryLedger::new(), Config::default())
}

async fn call(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

const SNAPSHOT: &str = r#"{"version":"1.0","generated":"2024-05-17T08:30:00Z","items":[
    {"code":"EF-591","name":"Pale Blue","manufacturer":"EF","kind":"on_hand","quantity":5},
    {"code":"XX-1","name":"Mystery","manufacturer":"XX","kind":"on_hand","quantity":1}
]}"#;

#[tokio::test]
async fn test_health() {
    let (status, json) = call(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["catalog_entries"], 5);
}

#[tokio::test]
async fn test_preview_import() {
    let (status, json) = call(app(), post("/api/v1/imports/preview", SNAPSHOT)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["item_count"], 2);
    assert_eq!(json["per_manufacturer_counts"]["EF"], 1);
}

#[tokio::test]
async fn test_import_reports_summary() {
    let (status, json) = call(
        app(),
        post("/api/v1/imports?policy=add_and_increase", SNAPSHOT),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["policy"], "add_and_increase");
    assert_eq!(json["summary"], "1 succeeded, 0 skipped, 1 failed");
    assert_eq!(json["result"]["failed_items"][0]["error_message"], "item not found");
}

#[tokio::test]
async fn test_import_rejects_unsupported_version() {
    let body = SNAPSHOT.replace("\"1.0\"", "\"2.0\"");
    let (status, json) = call(app(), post("/api/v1/imports", &body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "UNSUPPORTED_VERSION");
}

#[tokio::test]
async fn test_import_rejects_malformed_payload() {
    let (status, json) = call(app(), post("/api/v1/imports", "{\"version\":")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "MALFORMED_PAYLOAD");
}

#[tokio::test]
async fn test_import_rejects_oversized_snapshot() {
    let mut config = Config::default();
    config.import.max_snapshot_bytes = 16;
    let app = app_with(InMemoryLedger::new(), config);

    let (status, _) = call(app, post("/api/v1/imports", SNAPSHOT)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_list_inventory_with_filters() {
    let ledger = InMemoryLedger::with_records(vec![
        record("EF-591", InventoryKind::OnHand, 2),
        record("EF-204", InventoryKind::OnHand, 12),
        record("CiM-511101", InventoryKind::ToBuy, 1),
    ]);
    let app = app_with(ledger, Config::default());

    let (status, json) = call(app.clone(), get("/api/v1/inventory")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);

    let (_, json) = call(app.clone(), get("/api/v1/inventory?search=ef&low_stock=true")).await;
    let views = json.as_array().unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0]["item_key"], "EF-591");

    let (_, json) = call(app.clone(), get("/api/v1/inventory?kind=to_buy")).await;
    assert_eq!(json[0]["catalog_name"], "Peacock Glass");

    let (status, json) = call(app, get("/api/v1/inventory?kind=wishlist")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "kind");
}

#[tokio::test]
async fn test_item_locations() {
    let app = app();
    let body = r#"{"version":"1.0","generated":"2024-05-17T08:30:00Z","items":[
        {"code":"EF-591","name":"Pale Blue","manufacturer":"EF","kind":"on_hand","quantity":3,"location":"Drawer 1"}
    ]}"#;
    call(app.clone(), post("/api/v1/imports", body)).await;

    let (status, json) = call(app.clone(), get("/api/v1/inventory/EF-591/locations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["locations"][0]["location"], "Drawer 1");
    assert_eq!(json["locations"][0]["quantity"], "3");

    let (status, _) = call(app, get("/api/v1/inventory/GA-404/locations")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_locations_accepts_keys_without_hyphen() {
    let (status, _) = call(app(), get("/api/v1/inventory/591/locations")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = call(app(), get("/api/v1/inventory/EF%20591/locations")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_without_catalog_file() {
    let (status, json) = call(app(), post("/api/v1/catalog/refresh", "")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "CATALOG_ERROR");
}
