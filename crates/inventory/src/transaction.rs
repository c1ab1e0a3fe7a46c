//! Receiving and adjustment transactions.
//!
//! Transactions are ephemeral: they are consumed by the engine to produce an
//! updated item and are never persisted as entities of their own.

use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Stock delivered by a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingTransaction {
    pub received_quantity: f64,
    /// Replaces the item's cost per unit outright (no averaging).
    pub new_cost_per_unit: f64,
    pub expiration_date: Option<NaiveDate>,
    pub lot_number: Option<String>,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl ReceivingTransaction {
    pub fn new(received_quantity: f64, new_cost_per_unit: f64, occurred_at: DateTime<Utc>) -> Self {
        Self {
            received_quantity,
            new_cost_per_unit,
            expiration_date: None,
            lot_number: None,
            notes: None,
            occurred_at,
        }
    }

    pub fn with_expiration_date(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn with_lot_number(mut self, lot: impl Into<String>) -> Self {
        self.lot_number = Some(lot.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn validate(&self) -> Result<(), InventoryError> {
        if !(self.received_quantity.is_finite() && self.received_quantity > 0.0) {
            return Err(InventoryError::InvalidReceivingQuantity(self.received_quantity));
        }
        if !(self.new_cost_per_unit.is_finite() && self.new_cost_per_unit > 0.0) {
            return Err(InventoryError::InvalidReceivingCost(self.new_cost_per_unit));
        }
        Ok(())
    }
}

/// Closed set of reasons an on-hand quantity may be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentReason {
    PhysicalCountCorrection,
    DamagedSpoiled,
    TheftLoss,
    Waste,
    TransferOut,
    TransferIn,
    SystemErrorCorrection,
    Other,
}

impl AdjustmentReason {
    pub const ALL: [AdjustmentReason; 8] = [
        AdjustmentReason::PhysicalCountCorrection,
        AdjustmentReason::DamagedSpoiled,
        AdjustmentReason::TheftLoss,
        AdjustmentReason::Waste,
        AdjustmentReason::TransferOut,
        AdjustmentReason::TransferIn,
        AdjustmentReason::SystemErrorCorrection,
        AdjustmentReason::Other,
    ];

    pub fn code(self) -> &'static str {
        match self {
            AdjustmentReason::PhysicalCountCorrection => "PhysicalCountCorrection",
            AdjustmentReason::DamagedSpoiled => "DamagedSpoiled",
            AdjustmentReason::TheftLoss => "TheftLoss",
            AdjustmentReason::Waste => "Waste",
            AdjustmentReason::TransferOut => "TransferOut",
            AdjustmentReason::TransferIn => "TransferIn",
            AdjustmentReason::SystemErrorCorrection => "SystemErrorCorrection",
            AdjustmentReason::Other => "Other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdjustmentReason::PhysicalCountCorrection => "Physical Count Correction",
            AdjustmentReason::DamagedSpoiled => "Damaged/Spoiled",
            AdjustmentReason::TheftLoss => "Theft/Loss",
            AdjustmentReason::Waste => "Waste",
            AdjustmentReason::TransferOut => "Transfer Out",
            AdjustmentReason::TransferIn => "Transfer In",
            AdjustmentReason::SystemErrorCorrection => "System Error Correction",
            AdjustmentReason::Other => "Other",
        }
    }
}

impl core::fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// Reduce "Damaged/Spoiled", "damaged_spoiled" and "DamagedSpoiled" to one key.
fn reason_key(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for AdjustmentReason {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = reason_key(s);
        if key.is_empty() {
            return Err(InventoryError::MissingAdjustmentReason(s.to_string()));
        }
        AdjustmentReason::ALL
            .into_iter()
            .find(|r| reason_key(r.code()) == key)
            .ok_or_else(|| InventoryError::MissingAdjustmentReason(s.to_string()))
    }
}

/// Manual correction that sets on-hand quantity to an absolute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentTransaction {
    pub new_quantity: f64,
    /// `None` models a form submitted without a reason.
    pub reason: Option<AdjustmentReason>,
    pub notes: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl AdjustmentTransaction {
    pub fn new(new_quantity: f64, reason: AdjustmentReason, occurred_at: DateTime<Utc>) -> Self {
        Self {
            new_quantity,
            reason: Some(reason),
            notes: None,
            occurred_at,
        }
    }

    /// Build from raw form values; the reason code is parsed here so an empty
    /// or unknown code surfaces as `MissingAdjustmentReason`.
    pub fn from_form(
        new_quantity: f64,
        reason_code: &str,
        notes: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, InventoryError> {
        let reason = reason_code.parse::<AdjustmentReason>()?;
        Ok(Self {
            new_quantity,
            reason: Some(reason),
            notes: notes.filter(|n| !n.trim().is_empty()),
            occurred_at,
        })
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validates and returns the reason.
    pub fn validate(&self) -> Result<AdjustmentReason, InventoryError> {
        if !(self.new_quantity.is_finite() && self.new_quantity >= 0.0) {
            return Err(InventoryError::InvalidAdjustmentQuantity(self.new_quantity));
        }
        self.reason
            .ok_or_else(|| InventoryError::MissingAdjustmentReason(String::new()))
    }
}

/// How an adjustment form interprets its amount field.
///
/// The engine only understands absolute targets; this turns "add 5" or
/// "subtract 3" into one before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    Set,
    Add,
    Subtract,
}

impl AdjustmentMode {
    /// Absolute target quantity. Add/subtract clamp at zero; a set passes the
    /// amount through untouched so a negative target is still rejected.
    pub fn target(self, current: f64, amount: f64) -> f64 {
        match self {
            AdjustmentMode::Set => amount,
            AdjustmentMode::Add if amount.is_finite() => (current + amount).max(0.0),
            AdjustmentMode::Subtract if amount.is_finite() => (current - amount).max(0.0),
            // Non-finite amounts flow through to validation.
            _ => amount,
        }
    }
}
