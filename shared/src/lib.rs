//! Shared types and models for the Flameworker inventory
//!
//! This crate contains types shared between the backend, frontend (via WASM),
//! and other components of the system, plus the pure consolidation logic that
//! both sides run over ledger records.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
