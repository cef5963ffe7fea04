//! Inventory ledger collaborator and its in-memory implementation

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::{
    validate_location, validate_quantity, CatalogKey, InventoryKind, InventoryRecord,
    LocationAssignment, NewInventoryRecord,
};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Ledger operation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("record {0} not found")]
    RecordNotFound(Uuid),

    #[error("no {} record for {}", .kind.as_str(), .item_key)]
    NoRecordFor {
        item_key: CatalogKey,
        kind: InventoryKind,
    },

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Durable store of inventory records.
///
/// Implementations own their write serialization; callers may share one ledger
/// across tasks.
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// Store a new record, assigning its id and timestamps
    async fn create(&self, record: NewInventoryRecord) -> LedgerResult<InventoryRecord>;

    /// Overwrite an existing record's quantity and kind
    async fn update(&self, record: &InventoryRecord) -> LedgerResult<()>;

    async fn delete(&self, id: Uuid) -> LedgerResult<()>;

    async fn query_by_item(&self, item_key: &CatalogKey) -> LedgerResult<Vec<InventoryRecord>>;

    async fn query_all(&self) -> LedgerResult<Vec<InventoryRecord>>;

    /// Atomically add `delta` to the `(item_key, kind)` record and return it
    async fn add_quantity(
        &self,
        delta: Decimal,
        item_key: &CatalogKey,
        kind: InventoryKind,
    ) -> LedgerResult<InventoryRecord>;

    /// Associate `quantity` of an item with a location, replacing any previous
    /// quantity recorded for the same item and location
    async fn set_location(
        &self,
        item_key: &CatalogKey,
        location: &str,
        quantity: Decimal,
    ) -> LedgerResult<()>;

    async fn query_locations(&self, item_key: &CatalogKey)
        -> LedgerResult<Vec<LocationAssignment>>;

    /// Delete every record, returning how many were removed
    async fn delete_all(&self) -> LedgerResult<usize> {
        let records = self.query_all().await?;
        for record in &records {
            self.delete(record.id).await?;
        }
        Ok(records.len())
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    /// Insertion order is kept so queries are stable
    records: Vec<InventoryRecord>,
    locations: Vec<LocationAssignment>,
}

/// Ledger held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records, kept exactly as given
    pub fn with_records(records: Vec<InventoryRecord>) -> Self {
        Self {
            state: RwLock::new(LedgerState {
                records,
                locations: Vec::new(),
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.records.is_empty()
    }
}

#[async_trait]
impl InventoryLedger for InMemoryLedger {
    async fn create(&self, record: NewInventoryRecord) -> LedgerResult<InventoryRecord> {
        validate_quantity(record.quantity)
            .map_err(|e| LedgerError::InvalidQuantity(e.to_string()))?;

        let record = record.into_record();
        self.state.write().await.records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: &InventoryRecord) -> LedgerResult<()> {
        validate_quantity(record.quantity)
            .map_err(|e| LedgerError::InvalidQuantity(e.to_string()))?;

        let mut state = self.state.write().await;
        let stored = state
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(LedgerError::RecordNotFound(record.id))?;

        stored.kind = record.kind;
        stored.set_quantity(record.quantity);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> LedgerResult<()> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|r| r.id != id);

        if state.records.len() == before {
            return Err(LedgerError::RecordNotFound(id));
        }
        Ok(())
    }

    async fn query_by_item(&self, item_key: &CatalogKey) -> LedgerResult<Vec<InventoryRecord>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .iter()
            .filter(|r| &r.item_key == item_key)
            .cloned()
            .collect())
    }

    async fn query_all(&self) -> LedgerResult<Vec<InventoryRecord>> {
        Ok(self.state.read().await.records.clone())
    }

    async fn add_quantity(
        &self,
        delta: Decimal,
        item_key: &CatalogKey,
        kind: InventoryKind,
    ) -> LedgerResult<InventoryRecord> {
        let mut state = self.state.write().await;
        let record = state
            .records
            .iter_mut()
            .find(|r| &r.item_key == item_key && r.kind == kind)
            .ok_or_else(|| LedgerError::NoRecordFor {
                item_key: item_key.clone(),
                kind,
            })?;

        let quantity = record
            .quantity
            .checked_add(delta)
            .ok_or_else(|| LedgerError::InvalidQuantity("quantity overflow".to_string()))?;
        validate_quantity(quantity).map_err(|e| LedgerError::InvalidQuantity(e.to_string()))?;

        record.set_quantity(quantity);
        Ok(record.clone())
    }

    async fn set_location(
        &self,
        item_key: &CatalogKey,
        location: &str,
        quantity: Decimal,
    ) -> LedgerResult<()> {
        validate_location(location).map_err(|e| LedgerError::InvalidLocation(e.to_string()))?;
        validate_quantity(quantity).map_err(|e| LedgerError::InvalidQuantity(e.to_string()))?;

        let location = location.trim();
        let mut state = self.state.write().await;
        match state
            .locations
            .iter()
            .position(|a| &a.item_key == item_key && a.location == location)
        {
            Some(index) => {
                let assignment = &mut state.locations[index];
                assignment.quantity = quantity;
                assignment.assigned_at = Utc::now();
            }
            None => state.locations.push(LocationAssignment {
                item_key: item_key.clone(),
                location: location.to_string(),
                quantity,
                assigned_at: Utc::now(),
            }),
        }
        Ok(())
    }

    async fn query_locations(
        &self,
        item_key: &CatalogKey,
    ) -> LedgerResult<Vec<LocationAssignment>> {
        let state = self.state.read().await;
        Ok(state
            .locations
            .iter()
            .filter(|a| &a.item_key == item_key)
            .cloned()
            .collect())
    }

    async fn delete_all(&self) -> LedgerResult<usize> {
        let mut state = self.state.write().await;
        let removed = state.records.len();
        state.records.clear();
        state.locations.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> CatalogKey {
        CatalogKey::new(s)
    }

    #[tokio::test]
    async fn test_add_quantity_is_exact() {
        let ledger = InMemoryLedger::new();
        ledger
            .create(NewInventoryRecord::new(key("EF-591"), InventoryKind::OnHand, Decimal::new(25, 1)))
            .await
            .unwrap();

        let record = ledger
            .add_quantity(Decimal::new(5, 1), &key("EF-591"), InventoryKind::OnHand)
            .await
            .unwrap();

        assert_eq!(record.quantity, Decimal::from(3));
        assert_eq!(ledger.query_all().await.unwrap()[0].quantity, Decimal::from(3));
    }

    #[tokio::test]
    async fn test_add_quantity_requires_matching_kind() {
        let ledger = InMemoryLedger::new();
        ledger
            .create(NewInventoryRecord::new(key("EF-591"), InventoryKind::OnHand, Decimal::ONE))
            .await
            .unwrap();

        let err = ledger
            .add_quantity(Decimal::ONE, &key("EF-591"), InventoryKind::ToBuy)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no to_buy record for EF-591");
    }

    #[tokio::test]
    async fn test_add_quantity_overflow_leaves_record_unchanged() {
        let ledger = InMemoryLedger::new();
        ledger
            .create(NewInventoryRecord::new(key("EF-591"), InventoryKind::OnHand, Decimal::MAX))
            .await
            .unwrap();

        let err = ledger
            .add_quantity(Decimal::MAX, &key("EF-591"), InventoryKind::OnHand)
            .await
            .unwrap_err();

        assert_eq!(err, LedgerError::InvalidQuantity("quantity overflow".to_string()));
        assert_eq!(ledger.query_all().await.unwrap()[0].quantity, Decimal::MAX);
    }

    #[tokio::test]
    async fn test_update_overwrites_quantity_and_kind() {
        let ledger = InMemoryLedger::new();
        let created = ledger
            .create(NewInventoryRecord::new(key("EF-591"), InventoryKind::OnHand, Decimal::from(2)))
            .await
            .unwrap();

        let mut changed = created.clone();
        changed.kind = InventoryKind::ToSell;
        changed.quantity = Decimal::from(9);
        changed.date_modified = created.date_modified - chrono::Duration::days(1);
        ledger.update(&changed).await.unwrap();

        let stored = &ledger.query_all().await.unwrap()[0];
        assert_eq!(stored.kind, InventoryKind::ToSell);
        assert_eq!(stored.quantity, Decimal::from(9));
        assert_eq!(stored.date_added, created.date_added);
        assert!(stored.date_modified >= created.date_modified);

        let mut negative = stored.clone();
        negative.quantity = Decimal::NEGATIVE_ONE;
        assert!(matches!(
            ledger.update(&negative).await,
            Err(LedgerError::InvalidQuantity(_))
        ));
        assert_eq!(ledger.query_all().await.unwrap()[0].quantity, Decimal::from(9));

        let mut unknown = stored.clone();
        unknown.id = Uuid::new_v4();
        assert_eq!(
            ledger.update(&unknown).await,
            Err(LedgerError::RecordNotFound(unknown.id))
        );
    }

    #[tokio::test]
    async fn test_negative_quantities_rejected() {
        let ledger = InMemoryLedger::new();
        let result = ledger
            .create(NewInventoryRecord::new(key("EF-591"), InventoryKind::OnHand, Decimal::NEGATIVE_ONE))
            .await;
        assert!(matches!(result, Err(LedgerError::InvalidQuantity(_))));
        assert!(ledger.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_unknown_record() {
        let ledger = InMemoryLedger::new();
        let id = Uuid::new_v4();
        assert_eq!(ledger.delete(id).await, Err(LedgerError::RecordNotFound(id)));
    }

    #[tokio::test]
    async fn test_set_location_overwrites_same_location() {
        let ledger = InMemoryLedger::new();
        let item = key("EF-591");
        ledger.set_location(&item, "Drawer 1", Decimal::from(2)).await.unwrap();
        ledger.set_location(&item, " Drawer 1 ", Decimal::from(6)).await.unwrap();
        ledger.set_location(&item, "Shelf", Decimal::from(1)).await.unwrap();

        let locations = ledger.query_locations(&item).await.unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].location, "Drawer 1");
        assert_eq!(locations[0].quantity, Decimal::from(6));
    }

    #[tokio::test]
    async fn test_delete_all_clears_records_and_locations() {
        let ledger = InMemoryLedger::new();
        for code in ["EF-591", "EF-204", "CiM-511101"] {
            ledger
                .create(NewInventoryRecord::new(key(code), InventoryKind::OnHand, Decimal::ONE))
                .await
                .unwrap();
        }
        ledger.set_location(&key("EF-591"), "Drawer 1", Decimal::ONE).await.unwrap();

        assert_eq!(ledger.delete_all().await.unwrap(), 3);
        assert!(ledger.is_empty().await);
        assert!(ledger.query_locations(&key("EF-591")).await.unwrap().is_empty());
    }
}
