//! Reconciliation of external snapshots into the inventory ledger

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::{
    validate_quantity, CatalogKey, ImportDecision, ImportItem, ImportPolicy, ImportPreview,
    ImportResult, ImportSnapshot, InventoryKind, InventoryRecord, NewInventoryRecord,
    ParseKindError,
};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::services::catalog::CatalogLookup;
use crate::services::decision::ImportDecisionPort;
use crate::services::ledger::{InventoryLedger, LedgerError};

/// Reconciliation service applying snapshots to a ledger under an import policy
#[derive(Clone)]
pub struct ReconciliationService {
    ledger: Arc<dyn InventoryLedger>,
    catalog: Arc<dyn CatalogLookup>,
    /// One import at a time; per-item read-then-write must not interleave
    import_lock: Arc<Mutex<()>>,
}

/// Why a single snapshot item could not be applied
#[derive(Debug, Error)]
enum ItemError {
    #[error("item not found")]
    NotFound,

    #[error(transparent)]
    Kind(#[from] ParseKindError),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Catalog(AppError),
}

/// What happened to one item that did not fail
#[derive(Debug)]
enum ItemOutcome {
    Created(InventoryRecord),
    Increased(InventoryRecord),
    Replaced(InventoryRecord),
    Skipped,
}

impl ItemOutcome {
    /// The record whose quantity changed, if any
    fn changed_record(&self) -> Option<&InventoryRecord> {
        match self {
            ItemOutcome::Created(record)
            | ItemOutcome::Increased(record)
            | ItemOutcome::Replaced(record) => Some(record),
            ItemOutcome::Skipped => None,
        }
    }
}

impl ReconciliationService {
    pub fn new(ledger: Arc<dyn InventoryLedger>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self {
            ledger,
            catalog,
            import_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Summarize a snapshot without touching the ledger
    pub fn preview(&self, snapshot: &ImportSnapshot) -> ImportPreview {
        snapshot.preview()
    }

    /// Apply a snapshot to the ledger.
    ///
    /// Only an unsupported version or a failed erase step abort the run; every
    /// per-item problem is recorded in the returned result. Items are applied
    /// in snapshot order, and a cancelled import keeps the items already
    /// applied.
    pub async fn import(
        &self,
        snapshot: &ImportSnapshot,
        policy: ImportPolicy,
        decision_port: Option<&dyn ImportDecisionPort>,
    ) -> AppResult<ImportResult> {
        if !snapshot.is_supported_version() {
            return Err(AppError::UnsupportedVersion {
                found: snapshot.version.clone(),
            });
        }

        let _guard = self.import_lock.lock().await;
        tracing::info!(
            "Importing {} items with policy {}",
            snapshot.items.len(),
            policy
        );

        if policy == ImportPolicy::EraseAndReplace {
            let removed = self.ledger.delete_all().await?;
            tracing::info!("Erased {} existing records", removed);
        }

        let mut result = ImportResult::new(snapshot.items.len());
        for item in &snapshot.items {
            match self.apply_item(item, policy, decision_port).await {
                Ok(outcome) => {
                    tracing::debug!("{} -> {:?}", item.code, outcome);
                    match &outcome {
                        ItemOutcome::Skipped => result.record_skip(),
                        _ => result.record_success(),
                    }
                    self.assign_location(item, &outcome, &mut result).await;
                }
                Err(err) => {
                    tracing::warn!("Failed to import {}: {}", item.code, err);
                    result.record_failure(&item.code, err.to_string());
                }
            }
        }

        tracing::info!("Import finished: {}", result.summary());
        Ok(result)
    }

    async fn apply_item(
        &self,
        item: &ImportItem,
        policy: ImportPolicy,
        decision_port: Option<&dyn ImportDecisionPort>,
    ) -> Result<ItemOutcome, ItemError> {
        let key = self
            .catalog
            .resolve(&item.code)
            .await
            .map_err(ItemError::Catalog)?
            .ok_or(ItemError::NotFound)?;
        let kind: InventoryKind = item.kind.parse()?;
        validate_quantity(item.quantity).map_err(ItemError::InvalidQuantity)?;

        let existing = self
            .ledger
            .query_by_item(&key)
            .await?
            .into_iter()
            .find(|record| record.kind == kind);

        let Some(existing) = existing else {
            return Ok(ItemOutcome::Created(
                self.create(key, kind, item.quantity).await?,
            ));
        };

        match policy {
            // The ledger was emptied first, so this is a repeated line of the
            // same snapshot.
            ImportPolicy::EraseAndReplace => self.increase(item.quantity, &key, kind).await,
            ImportPolicy::AddNewOnly => Ok(ItemOutcome::Skipped),
            ImportPolicy::AddAndIncrease => self.increase(item.quantity, &key, kind).await,
            ImportPolicy::AskPerItem => {
                let decision = match decision_port {
                    Some(port) => port.decide(item, &existing).await,
                    None => ImportDecision::Skip,
                };

                match decision {
                    ImportDecision::Skip => Ok(ItemOutcome::Skipped),
                    ImportDecision::Replace => {
                        self.ledger.delete(existing.id).await?;
                        let record = self.create(key, kind, item.quantity).await?;
                        Ok(ItemOutcome::Replaced(record))
                    }
                    ImportDecision::Increase => self.increase(item.quantity, &key, kind).await,
                }
            }
        }
    }

    async fn create(
        &self,
        key: CatalogKey,
        kind: InventoryKind,
        quantity: Decimal,
    ) -> Result<InventoryRecord, ItemError> {
        Ok(self
            .ledger
            .create(NewInventoryRecord::new(key, kind, quantity))
            .await?)
    }

    async fn increase(
        &self,
        delta: Decimal,
        key: &CatalogKey,
        kind: InventoryKind,
    ) -> Result<ItemOutcome, ItemError> {
        let record = self.ledger.add_quantity(delta, key, kind).await?;
        Ok(ItemOutcome::Increased(record))
    }

    /// Attach the item's location after its quantity change.
    ///
    /// A failure here leaves the quantity change in place.
    async fn assign_location(
        &self,
        item: &ImportItem,
        outcome: &ItemOutcome,
        result: &mut ImportResult,
    ) {
        let (Some(location), Some(record)) = (item.location(), outcome.changed_record()) else {
            return;
        };

        if let Err(err) = self
            .ledger
            .set_location(&record.item_key, location, record.quantity)
            .await
        {
            tracing::warn!(
                "Failed to assign {} to location '{}': {}",
                item.code,
                location,
                err
            );
            result.record_location_failure(&item.code, err.to_string());
        }
    }
}
