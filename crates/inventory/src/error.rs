//! Inventory engine errors.

use thiserror::Error;

use mise_core::DomainError;

/// Synchronous, locally recoverable failures of the inventory engine.
///
/// Every variant is raised before any new state is computed, so a failed call
/// never yields a partially updated item.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error("received quantity must be a finite number greater than zero (got {0})")]
    InvalidReceivingQuantity(f64),

    #[error("new cost per unit must be a finite number greater than zero (got {0})")]
    InvalidReceivingCost(f64),

    #[error("adjusted quantity must be a finite number of at least zero (got {0})")]
    InvalidAdjustmentQuantity(f64),

    #[error("adjustment reason is missing or unknown: {0:?}")]
    MissingAdjustmentReason(String),

    /// Item draft or detail edit failed shape validation.
    #[error("invalid item: {0}")]
    InvalidItem(String),
}

impl InventoryError {
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::InvalidItem(msg.into())
    }
}

impl From<InventoryError> for DomainError {
    fn from(value: InventoryError) -> Self {
        DomainError::validation(value.to_string())
    }
}
