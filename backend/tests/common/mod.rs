//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flameworker::services::{
    CatalogService, InMemoryLedger, InventoryLedger, LedgerError, LedgerResult,
    ReconciliationService,
};
use rust_decimal::Decimal;
use shared::{
    CatalogEntry, CatalogIndex, CatalogKey, ImportItem, ImportSnapshot, InventoryKind,
    InventoryRecord, LocationAssignment, NewInventoryRecord,
};
use uuid::Uuid;

pub fn entry(manufacturer: &str, code: &str, name: &str) -> CatalogEntry {
    CatalogEntry {
        id: CatalogKey::from_parts(manufacturer, code),
        code: code.to_string(),
        manufacturer: manufacturer.to_string(),
        name: name.to_string(),
        description: None,
        synonyms: None,
        tags: Vec::new(),
    }
}

/// A small Effetre / CiM catalog
pub fn catalog_index() -> CatalogIndex {
    CatalogIndex::from_entries([
        entry("EF", "591", "Pale Blue Glass"),
        entry("EF", "204", "Dark Amber"),
        entry("EF", "264", "Ivory"),
        entry("CiM", "511101", "Peacock Glass"),
        entry("CiM", "213", "Slag"),
    ])
}

pub fn catalog() -> CatalogService {
    CatalogService::from_index(catalog_index())
}

pub fn item(code: &str, kind: &str, quantity: Decimal) -> ImportItem {
    ImportItem {
        code: code.to_string(),
        name: String::new(),
        manufacturer: code.split('-').next().unwrap_or_default().to_string(),
        kind: kind.to_string(),
        quantity,
        location: None,
    }
}

pub fn on_hand(code: &str, quantity: i64) -> ImportItem {
    item(code, "on_hand", Decimal::from(quantity))
}

pub fn located(mut item: ImportItem, location: &str) -> ImportItem {
    item.location = Some(location.to_string());
    item
}

pub fn snapshot(items: Vec<ImportItem>) -> ImportSnapshot {
    ImportSnapshot::new("1.0", items)
}

pub fn record(key: &str, kind: InventoryKind, quantity: i64) -> InventoryRecord {
    InventoryRecord::new(CatalogKey::new(key), kind, Decimal::from(quantity))
}

pub fn reconciler(ledger: Arc<dyn InventoryLedger>) -> ReconciliationService {
    ReconciliationService::new(ledger, Arc::new(catalog()))
}

/// Wraps an in-memory ledger and fails chosen operations on demand
#[derive(Default)]
pub struct FailingLedger {
    pub inner: InMemoryLedger,
    fail_create_for: Mutex<HashSet<String>>,
    fail_locations: Mutex<bool>,
    fail_delete_all: Mutex<bool>,
}

impl FailingLedger {
    pub fn new(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_create_for(&self, key: &str) {
        self.fail_create_for.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_locations(&self) {
        *self.fail_locations.lock().unwrap() = true;
    }

    pub fn fail_delete_all(&self) {
        *self.fail_delete_all.lock().unwrap() = true;
    }

    fn unavailable() -> LedgerError {
        LedgerError::Unavailable("injected failure".to_string())
    }
}

#[async_trait]
impl InventoryLedger for FailingLedger {
    async fn create(&self, record: NewInventoryRecord) -> LedgerResult<InventoryRecord> {
        if self
            .fail_create_for
            .lock()
            .unwrap()
            .contains(record.item_key.as_str())
        {
            return Err(Self::unavailable());
        }
        self.inner.create(record).await
    }

    async fn update(&self, record: &InventoryRecord) -> LedgerResult<()> {
        self.inner.update(record).await
    }

    async fn delete(&self, id: Uuid) -> LedgerResult<()> {
        self.inner.delete(id).await
    }

    async fn query_by_item(&self, item_key: &CatalogKey) -> LedgerResult<Vec<InventoryRecord>> {
        self.inner.query_by_item(item_key).await
    }

    async fn query_all(&self) -> LedgerResult<Vec<InventoryRecord>> {
        self.inner.query_all().await
    }

    async fn add_quantity(
        &self,
        delta: Decimal,
        item_key: &CatalogKey,
        kind: InventoryKind,
    ) -> LedgerResult<InventoryRecord> {
        self.inner.add_quantity(delta, item_key, kind).await
    }

    async fn set_location(
        &self,
        item_key: &CatalogKey,
        location: &str,
        quantity: Decimal,
    ) -> LedgerResult<()> {
        if *self.fail_locations.lock().unwrap() {
            return Err(Self::unavailable());
        }
        self.inner.set_location(item_key, location, quantity).await
    }

    async fn query_locations(
        &self,
        item_key: &CatalogKey,
    ) -> LedgerResult<Vec<LocationAssignment>> {
        self.inner.query_locations(item_key).await
    }

    async fn delete_all(&self) -> LedgerResult<usize> {
        if *self.fail_delete_all.lock().unwrap() {
            return Err(Self::unavailable());
        }
        self.inner.delete_all().await
    }
}
