//! Inventory events: audit data returned alongside every updated item.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mise_core::EntityId;
use mise_events::Event;

use crate::item::InventoryItemId;
use crate::status::StockStatus;
use crate::transaction::AdjustmentReason;

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item_id: InventoryItemId,
    pub name: String,
    pub opening_stock: f64,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated (catalog fields or par levels changed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub item_id: InventoryItemId,
    pub previous_status: StockStatus,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockReceived.
///
/// Lot number and notes live only here; the item does not keep them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockReceived {
    pub item_id: InventoryItemId,
    pub received_quantity: f64,
    pub previous_stock: f64,
    pub new_stock: f64,
    pub previous_cost_per_unit: f64,
    pub new_cost_per_unit: f64,
    pub expiration_date: Option<NaiveDate>,
    pub lot_number: Option<String>,
    pub notes: Option<String>,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub item_id: InventoryItemId,
    pub previous_stock: f64,
    pub new_stock: f64,
    pub reason: AdjustmentReason,
    pub notes: Option<String>,
    /// `(new - previous) * cost_per_unit`; negative for a decrease.
    pub value_delta: f64,
    pub status: StockStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemCreated(ItemCreated),
    ItemUpdated(ItemUpdated),
    StockReceived(StockReceived),
    StockAdjusted(StockAdjusted),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemCreated(_) => "inventory.item.created",
            InventoryEvent::ItemUpdated(_) => "inventory.item.updated",
            InventoryEvent::StockReceived(_) => "inventory.stock.received",
            InventoryEvent::StockAdjusted(_) => "inventory.stock.adjusted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn entity_id(&self) -> EntityId {
        match self {
            InventoryEvent::ItemCreated(e) => e.item_id.0,
            InventoryEvent::ItemUpdated(e) => e.item_id.0,
            InventoryEvent::StockReceived(e) => e.item_id.0,
            InventoryEvent::StockAdjusted(e) => e.item_id.0,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemCreated(e) => e.occurred_at,
            InventoryEvent::ItemUpdated(e) => e.occurred_at,
            InventoryEvent::StockReceived(e) => e.occurred_at,
            InventoryEvent::StockAdjusted(e) => e.occurred_at,
        }
    }
}

macro_rules! impl_into_inventory_event {
    ($($t:ident),* $(,)?) => {
        $(
            impl From<$t> for InventoryEvent {
                fn from(value: $t) -> Self {
                    InventoryEvent::$t(value)
                }
            }
        )*
    };
}

impl_into_inventory_event!(ItemCreated, ItemUpdated, StockReceived, StockAdjusted);
