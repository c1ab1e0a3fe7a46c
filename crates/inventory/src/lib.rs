//! Inventory domain module.
//!
//! Stock status, valuation, receiving, adjustments, summary counters and
//! exports for kitchen inventory lines. Everything here is deterministic
//! domain logic: no IO, no clock, no storage.

pub mod engine;
pub mod error;
pub mod event;
pub mod export;
pub mod filter;
pub mod item;
pub mod stats;
pub mod status;
pub mod transaction;

pub use engine::{Applied, adjust, create_item, receive, total_valuation, update_details, valuation};
pub use error::InventoryError;
pub use event::{InventoryEvent, ItemCreated, ItemUpdated, StockAdjusted, StockReceived};
pub use export::{CSV_HEADER, ExportError, export_csv, export_csv_string, export_json};
pub use filter::{InventoryFilter, categories};
pub use item::{InventoryItem, InventoryItemId, InventoryRecord, ItemDetails, NewInventoryItem};
pub use stats::{EXPIRING_SOON_DAYS, ExpiryClass, InventoryStats, expiry_class, summarize, summarize_with_window};
pub use status::{StockLevels, StockStatus, derive_status};
pub use transaction::{AdjustmentMode, AdjustmentReason, AdjustmentTransaction, ReceivingTransaction};
