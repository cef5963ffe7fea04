//! Validation utilities for inventory input

use rust_decimal::Decimal;

/// Longest free-text location the ledger accepts
pub const MAX_LOCATION_LENGTH: usize = 120;

// ============================================================================
// Quantity Validations
// ============================================================================

/// Validate that a quantity can be stored on a ledger record
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Validate a low-quantity threshold used for filtering
pub fn validate_threshold(threshold: Decimal) -> Result<(), &'static str> {
    if threshold <= Decimal::ZERO {
        return Err("Threshold must be positive");
    }
    Ok(())
}

// ============================================================================
// Catalog and Location Validations
// ============================================================================

/// Validate a catalog key; keys are opaque, only blank or spaced keys are refused
pub fn validate_catalog_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Catalog key cannot be empty");
    }
    if key.chars().any(char::is_whitespace) {
        return Err("Catalog key cannot contain whitespace");
    }
    Ok(())
}

/// Validate a free-text location label
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err("Location cannot be blank");
    }
    if trimmed.chars().count() > MAX_LOCATION_LENGTH {
        return Err("Location is too long");
    }
    Ok(())
}
