//! Domain models for the Flameworker inventory

mod catalog;
mod consolidated;
mod filter;
mod import;
mod inventory;
mod snapshot;

pub use catalog::*;
pub use consolidated::*;
pub use filter::*;
pub use import::*;
pub use inventory::*;
pub use snapshot::*;
