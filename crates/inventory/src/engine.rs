//! The inventory engine: pure functions from (item, transaction) to a new item.
//!
//! Nothing here performs IO, reads a clock or holds state. Timestamps come in
//! on the transactions. Callers own read-modify-write against their store;
//! two concurrent calls on the same item are last-write-wins.

use chrono::{DateTime, Utc};

use crate::error::InventoryError;
use crate::event::{ItemCreated, ItemUpdated, StockAdjusted, StockReceived};
use crate::item::{InventoryItem, InventoryItemId, ItemDetails, NewInventoryItem};
use crate::transaction::{AdjustmentTransaction, ReceivingTransaction};

/// An updated item plus the event describing the change.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<E> {
    pub item: InventoryItem,
    pub event: E,
}

impl Applied<StockAdjusted> {
    /// Monetary effect of the adjustment (reported, never stored).
    pub fn value_delta(&self) -> f64 {
        self.event.value_delta
    }
}

/// `current_stock * cost_per_unit`, unrounded.
pub fn valuation(item: &InventoryItem) -> f64 {
    item.valuation()
}

/// Sum of per-item valuations.
pub fn total_valuation<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> f64 {
    items.into_iter().map(valuation).sum()
}

pub fn create_item(
    id: InventoryItemId,
    draft: NewInventoryItem,
    occurred_at: DateTime<Utc>,
) -> Result<Applied<ItemCreated>, InventoryError> {
    let item = InventoryItem::create(id, draft, occurred_at)?;
    let event = ItemCreated {
        item_id: id,
        name: item.name().to_string(),
        opening_stock: item.current_stock(),
        status: item.status(),
        occurred_at,
    };
    Ok(Applied { item, event })
}

/// Replace catalog fields and par levels. Quantity is untouched; status is
/// re-derived because the thresholds may have moved.
pub fn update_details(
    item: &InventoryItem,
    details: ItemDetails,
    occurred_at: DateTime<Utc>,
) -> Result<Applied<ItemUpdated>, InventoryError> {
    details.validate()?;

    let previous_status = item.status();
    let mut next = item.clone();
    next.replace_details(details, occurred_at);

    let event = ItemUpdated {
        item_id: next.id_typed(),
        previous_status,
        status: next.status(),
        occurred_at,
    };
    Ok(Applied { item: next, event })
}

/// Add delivered stock. The new cost per unit overwrites the old one (no
/// weighted average).
///
/// The resulting on-hand quantity must stay finite; a receipt that would
/// overflow it is rejected as an invalid quantity.
pub fn receive(
    item: &InventoryItem,
    txn: &ReceivingTransaction,
) -> Result<Applied<StockReceived>, InventoryError> {
    txn.validate()?;
    if !(item.current_stock() + txn.received_quantity).is_finite() {
        return Err(InventoryError::InvalidReceivingQuantity(txn.received_quantity));
    }

    let mut next = item.clone();
    next.record_receipt(
        txn.received_quantity,
        txn.new_cost_per_unit,
        txn.expiration_date,
        txn.occurred_at,
    );

    let event = StockReceived {
        item_id: next.id_typed(),
        received_quantity: txn.received_quantity,
        previous_stock: item.current_stock(),
        new_stock: next.current_stock(),
        previous_cost_per_unit: item.cost_per_unit(),
        new_cost_per_unit: next.cost_per_unit(),
        expiration_date: next.expiration_date(),
        lot_number: txn.lot_number.clone(),
        notes: txn.notes.clone(),
        status: next.status(),
        occurred_at: txn.occurred_at,
    };
    Ok(Applied { item: next, event })
}

/// Set on-hand quantity to an absolute value for a documented reason.
pub fn adjust(
    item: &InventoryItem,
    txn: &AdjustmentTransaction,
) -> Result<Applied<StockAdjusted>, InventoryError> {
    let reason = txn.validate()?;

    let mut next = item.clone();
    next.set_stock(txn.new_quantity, txn.occurred_at);

    let event = StockAdjusted {
        item_id: next.id_typed(),
        previous_stock: item.current_stock(),
        new_stock: txn.new_quantity,
        reason,
        notes: txn.notes.clone(),
        value_delta: (txn.new_quantity - item.current_stock()) * item.cost_per_unit(),
        status: next.status(),
        occurred_at: txn.occurred_at,
    };
    Ok(Applied { item: next, event })
}
