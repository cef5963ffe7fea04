//! Business logic services for the Flameworker inventory

pub mod catalog;
pub mod consolidation;
pub mod decision;
pub mod ledger;
pub mod reconciliation;
pub mod snapshot;

pub use catalog::{CatalogLookup, CatalogService};
pub use consolidation::{ConsolidationService, ItemLocations};
pub use decision::{ChannelDecisionPort, DecisionRequest, FixedDecisionPort, ImportDecisionPort};
pub use ledger::{InMemoryLedger, InventoryLedger, LedgerError, LedgerResult};
pub use reconciliation::ReconciliationService;
pub use snapshot::{DecodeError, SnapshotDecoder};
