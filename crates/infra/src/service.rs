//! Inventory service: load → engine → save against a [`DocumentStore`].
//!
//! The service does not serialize callers. Two concurrent mutations of the
//! same collection race, and the later `save` wins.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{info, warn};

use mise_core::{DomainError, Entity};
use mise_events::Event;
use mise_inventory::{
    AdjustmentMode, AdjustmentReason, AdjustmentTransaction, Applied, ExportError, InventoryError,
    InventoryEvent, InventoryFilter, InventoryItem, InventoryItemId, InventoryRecord, InventoryStats,
    ItemCreated, ItemDetails, ItemUpdated, NewInventoryItem, ReceivingTransaction, StockAdjusted,
    StockReceived, EXPIRING_SOON_DAYS,
};

use crate::config::InfraConfig;
use crate::store::{DocumentStore, StoreError};

pub const INVENTORY_COLLECTION: &str = "inventory";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("inventory item not found: {0}")]
    NotFound(InventoryItemId),

    #[error("inventory item already exists: {0}")]
    Duplicate(InventoryItemId),

    /// A stored document decoded but breaks an item rule (e.g. negative stock).
    #[error("stored inventory record {id} is invalid: {source}")]
    CorruptRecord {
        id: InventoryItemId,
        #[source]
        source: InventoryError,
    },
}

impl ServiceError {
    /// Domain view of the failure, when there is one. Storage and export
    /// failures are not domain errors.
    pub fn as_domain(&self) -> Option<DomainError> {
        match self {
            ServiceError::Inventory(e) => Some(e.clone().into()),
            ServiceError::NotFound(_) => Some(DomainError::not_found()),
            ServiceError::Duplicate(id) => Some(DomainError::conflict(format!("inventory item {id} already exists"))),
            ServiceError::CorruptRecord { id, source } => {
                Some(DomainError::invariant(format!("stored inventory record {id}: {source}")))
            }
            ServiceError::Store(_) | ServiceError::Export(_) => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub struct InventoryService<S> {
    store: S,
    expiring_soon_days: i64,
}

impl<S> InventoryService<S>
where
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            expiring_soon_days: EXPIRING_SOON_DAYS,
        }
    }

    pub fn from_config(store: S, config: &InfraConfig) -> Self {
        Self::new(store).with_expiring_soon_days(config.expiring_soon_days)
    }

    pub fn with_expiring_soon_days(mut self, days: i64) -> Self {
        self.expiring_soon_days = days;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Readable items only. A document that fails to decode or validate is
    /// logged and left out so it cannot hide the rest of the collection.
    fn load_items(&self) -> ServiceResult<Vec<InventoryItem>> {
        let docs = self.store.load(INVENTORY_COLLECTION)?;
        Ok(docs
            .into_iter()
            .enumerate()
            .filter_map(|(index, doc)| match decode(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(index, error = %e, "skipping unreadable inventory record");
                    None
                }
            })
            .collect())
    }

    /// Raw collection plus the position and decoded item for `id`. Every other
    /// document is carried through as stored, readable or not.
    fn locate(&self, id: InventoryItemId) -> ServiceResult<(Vec<JsonValue>, usize, InventoryItem)> {
        let docs = self.store.load(INVENTORY_COLLECTION)?;
        let pos = docs
            .iter()
            .position(|doc| doc_id(doc) == Some(id))
            .ok_or(ServiceError::NotFound(id))?;
        let item = decode(docs[pos].clone())?;
        Ok((docs, pos, item))
    }

    fn mutate<E, F>(&self, id: InventoryItemId, op: F) -> ServiceResult<Applied<E>>
    where
        E: Clone + Into<InventoryEvent>,
        F: FnOnce(&InventoryItem) -> Result<Applied<E>, InventoryError>,
    {
        let (mut docs, pos, item) = self.locate(id)?;

        let applied = op(&item)?;
        debug_assert_eq!(*applied.item.id(), id);
        docs[pos] = encode(&applied.item)?;
        self.store.save(INVENTORY_COLLECTION, &docs)?;

        log_event(&applied.event.clone().into());
        Ok(applied)
    }

    pub fn list(&self) -> ServiceResult<Vec<InventoryItem>> {
        self.load_items()
    }

    pub fn list_filtered(&self, filter: &InventoryFilter) -> ServiceResult<Vec<InventoryItem>> {
        let mut items = self.load_items()?;
        items.retain(|item| filter.matches(item));
        Ok(items)
    }

    pub fn get(&self, id: InventoryItemId) -> ServiceResult<InventoryItem> {
        self.locate(id).map(|(_, _, item)| item)
    }

    pub fn create(&self, draft: NewInventoryItem, occurred_at: DateTime<Utc>) -> ServiceResult<Applied<ItemCreated>> {
        self.create_with_id(InventoryItemId::generate(), draft, occurred_at)
    }

    pub fn create_with_id(
        &self,
        id: InventoryItemId,
        draft: NewInventoryItem,
        occurred_at: DateTime<Utc>,
    ) -> ServiceResult<Applied<ItemCreated>> {
        let mut docs = self.store.load(INVENTORY_COLLECTION)?;
        if docs.iter().any(|doc| doc_id(doc) == Some(id)) {
            return Err(ServiceError::Duplicate(id));
        }

        let applied = mise_inventory::create_item(id, draft, occurred_at)?;
        docs.push(encode(&applied.item)?);
        self.store.save(INVENTORY_COLLECTION, &docs)?;

        log_event(&applied.event.clone().into());
        Ok(applied)
    }

    pub fn update_details(
        &self,
        id: InventoryItemId,
        details: ItemDetails,
        occurred_at: DateTime<Utc>,
    ) -> ServiceResult<Applied<ItemUpdated>> {
        self.mutate(id, |item| mise_inventory::update_details(item, details, occurred_at))
    }

    pub fn receive(&self, id: InventoryItemId, txn: &ReceivingTransaction) -> ServiceResult<Applied<StockReceived>> {
        self.mutate(id, |item| mise_inventory::receive(item, txn))
    }

    pub fn adjust(&self, id: InventoryItemId, txn: &AdjustmentTransaction) -> ServiceResult<Applied<StockAdjusted>> {
        self.mutate(id, |item| mise_inventory::adjust(item, txn))
    }

    /// Add/subtract/set form: resolves the absolute target against the
    /// freshly loaded quantity, then adjusts.
    pub fn adjust_by(
        &self,
        id: InventoryItemId,
        mode: AdjustmentMode,
        amount: f64,
        reason: AdjustmentReason,
        notes: Option<String>,
        occurred_at: DateTime<Utc>,
    ) -> ServiceResult<Applied<StockAdjusted>> {
        self.mutate(id, |item| {
            let target = mode.target(item.current_stock(), amount);
            let txn = AdjustmentTransaction {
                new_quantity: target,
                reason: Some(reason),
                notes,
                occurred_at,
            };
            mise_inventory::adjust(item, &txn)
        })
    }

    /// Removes the document with this id whether or not it is readable.
    pub fn delete(&self, id: InventoryItemId) -> ServiceResult<()> {
        let mut docs = self.store.load(INVENTORY_COLLECTION)?;
        let pos = docs
            .iter()
            .position(|doc| doc_id(doc) == Some(id))
            .ok_or(ServiceError::NotFound(id))?;
        docs.remove(pos);
        self.store.save(INVENTORY_COLLECTION, &docs)?;

        info!(item_id = %id, "inventory item deleted");
        Ok(())
    }

    pub fn summary(&self, today: NaiveDate) -> ServiceResult<InventoryStats> {
        let items = self.load_items()?;
        Ok(mise_inventory::summarize_with_window(&items, today, self.expiring_soon_days))
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> ServiceResult<()> {
        let items = self.load_items()?;
        mise_inventory::export_csv(&items, writer)?;
        Ok(())
    }

    pub fn export_json(&self) -> ServiceResult<String> {
        let items = self.load_items()?;
        Ok(mise_inventory::export_json(&items)?)
    }
}

fn doc_id(doc: &JsonValue) -> Option<InventoryItemId> {
    doc.get("id")?.as_str()?.parse().ok()
}

fn decode(doc: JsonValue) -> ServiceResult<InventoryItem> {
    let record: InventoryRecord = serde_json::from_value(doc).map_err(StoreError::from)?;
    if let Some(stored) = record.stale_status() {
        warn!(
            item_id = %record.id,
            stored = stored.code(),
            derived = record.derived_status().code(),
            "stored status disagrees with quantity; discarding stored value"
        );
    }
    let id = record.id;
    InventoryItem::try_from(record).map_err(|source| ServiceError::CorruptRecord { id, source })
}

fn encode(item: &InventoryItem) -> ServiceResult<JsonValue> {
    Ok(serde_json::to_value(InventoryRecord::from(item)).map_err(StoreError::from)?)
}

fn log_event(event: &InventoryEvent) {
    match event {
        InventoryEvent::StockReceived(e) => info!(
            event_type = event.event_type(),
            item_id = %event.entity_id(),
            received = e.received_quantity,
            new_stock = e.new_stock,
            cost_per_unit = e.new_cost_per_unit,
            status = e.status.code(),
            lot = e.lot_number.as_deref().unwrap_or(""),
            "stock received"
        ),
        InventoryEvent::StockAdjusted(e) => info!(
            event_type = event.event_type(),
            item_id = %event.entity_id(),
            previous_stock = e.previous_stock,
            new_stock = e.new_stock,
            reason = e.reason.code(),
            value_delta = e.value_delta,
            status = e.status.code(),
            "stock adjusted"
        ),
        _ => info!(
            event_type = event.event_type(),
            item_id = %event.entity_id(),
            "inventory item changed"
        ),
    }
}
