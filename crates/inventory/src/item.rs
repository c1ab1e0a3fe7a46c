use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use mise_core::{Entity, EntityId};

use crate::error::InventoryError;
use crate::status::{StockLevels, StockStatus, derive_status};

/// Inventory item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItemId(pub EntityId);

impl InventoryItemId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }

    pub fn generate() -> Self {
        Self(EntityId::new())
    }
}

impl core::fmt::Display for InventoryItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for InventoryItemId {
    type Err = mise_core::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Editable catalog fields and par levels of an item.
///
/// Everything here may be changed by an edit form. On-hand quantity is not:
/// it only moves through receiving and adjustments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemDetails {
    pub name: String,
    /// SKU/product code. Uniqueness is the catalog's concern.
    pub code: String,
    pub category: String,
    pub supplier: String,
    pub location: String,
    /// Display-only unit label ("lbs", "kg", ...).
    pub unit: String,
    pub min_stock: f64,
    /// `None` means no upper par level.
    pub max_stock: Option<f64>,
    pub cost_per_unit: f64,
    pub expiration_date: Option<NaiveDate>,
}

impl ItemDetails {
    /// Shape validation. `max_stock > min_stock` is deliberately not checked.
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.name.trim().is_empty() {
            return Err(InventoryError::invalid_item("name cannot be empty"));
        }
        ensure_non_negative("min_stock", self.min_stock)?;
        if let Some(max) = self.max_stock {
            ensure_non_negative("max_stock", max)?;
        }
        ensure_non_negative("cost_per_unit", self.cost_per_unit)?;
        Ok(())
    }
}

fn ensure_non_negative(field: &str, value: f64) -> Result<(), InventoryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InventoryError::invalid_item(format!(
            "{field} must be a finite non-negative number (got {value})"
        )))
    }
}

/// Draft submitted by a create form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub details: ItemDetails,
    /// Quantity on hand at creation; zero unless the form says otherwise.
    pub opening_stock: f64,
}

impl NewInventoryItem {
    pub fn new(details: ItemDetails) -> Self {
        Self {
            details,
            opening_stock: 0.0,
        }
    }

    pub fn with_opening_stock(mut self, quantity: f64) -> Self {
        self.opening_stock = quantity;
        self
    }
}

/// One stocked ingredient or supply line.
///
/// Fields are private: quantity changes go through [`crate::engine`] so the
/// derived status can never drift from the quantity it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    id: InventoryItemId,
    details: ItemDetails,
    current_stock: f64,
    last_received: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub(crate) fn create(
        id: InventoryItemId,
        draft: NewInventoryItem,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, InventoryError> {
        draft.details.validate()?;
        ensure_non_negative("opening_stock", draft.opening_stock)?;
        Ok(Self {
            id,
            details: draft.details,
            current_stock: draft.opening_stock,
            last_received: None,
            created_at: occurred_at,
            updated_at: occurred_at,
        })
    }

    pub fn id_typed(&self) -> InventoryItemId {
        self.id
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn code(&self) -> &str {
        &self.details.code
    }

    pub fn category(&self) -> &str {
        &self.details.category
    }

    pub fn unit(&self) -> &str {
        &self.details.unit
    }

    pub fn current_stock(&self) -> f64 {
        self.current_stock
    }

    pub fn min_stock(&self) -> f64 {
        self.details.min_stock
    }

    pub fn max_stock(&self) -> Option<f64> {
        self.details.max_stock
    }

    pub fn cost_per_unit(&self) -> f64 {
        self.details.cost_per_unit
    }

    pub fn expiration_date(&self) -> Option<NaiveDate> {
        self.details.expiration_date
    }

    pub fn last_received(&self) -> Option<DateTime<Utc>> {
        self.last_received
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels {
            current: self.current_stock,
            min: self.details.min_stock,
            max: self.details.max_stock,
        }
    }

    /// Status derived on read; there is no stored copy to go stale.
    pub fn status(&self) -> StockStatus {
        derive_status(self.levels())
    }

    /// `current_stock * cost_per_unit`, unrounded.
    pub fn valuation(&self) -> f64 {
        self.current_stock * self.details.cost_per_unit
    }

    pub(crate) fn set_stock(&mut self, quantity: f64, occurred_at: DateTime<Utc>) {
        self.current_stock = quantity;
        self.updated_at = occurred_at;
    }

    pub(crate) fn record_receipt(
        &mut self,
        quantity: f64,
        cost_per_unit: f64,
        expiration_date: Option<NaiveDate>,
        occurred_at: DateTime<Utc>,
    ) {
        self.current_stock += quantity;
        self.details.cost_per_unit = cost_per_unit;
        if let Some(date) = expiration_date {
            self.details.expiration_date = Some(date);
        }
        self.last_received = Some(occurred_at);
        self.updated_at = occurred_at;
    }

    pub(crate) fn replace_details(&mut self, details: ItemDetails, occurred_at: DateTime<Utc>) {
        self.details = details;
        self.updated_at = occurred_at;
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Document shape of an item as written to a store or a JSON export.
///
/// `status` is a cache of the derived value for readers that cannot run the
/// derivation themselves. It is written on every save and ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: InventoryItemId,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub unit: String,
    pub current_stock: f64,
    pub min_stock: f64,
    #[serde(default)]
    pub max_stock: Option<f64>,
    pub cost_per_unit: f64,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_received: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<StockStatus>,
}

impl InventoryRecord {
    pub fn derived_status(&self) -> StockStatus {
        derive_status(StockLevels {
            current: self.current_stock,
            min: self.min_stock,
            max: self.max_stock,
        })
    }

    /// Returns the stored status when it disagrees with the derived one.
    pub fn stale_status(&self) -> Option<StockStatus> {
        self.status.filter(|stored| *stored != self.derived_status())
    }
}

impl From<&InventoryItem> for InventoryRecord {
    fn from(item: &InventoryItem) -> Self {
        let d = &item.details;
        Self {
            id: item.id,
            name: d.name.clone(),
            code: d.code.clone(),
            category: d.category.clone(),
            supplier: d.supplier.clone(),
            location: d.location.clone(),
            unit: d.unit.clone(),
            current_stock: item.current_stock,
            min_stock: d.min_stock,
            max_stock: d.max_stock,
            cost_per_unit: d.cost_per_unit,
            expiration_date: d.expiration_date,
            last_received: item.last_received,
            created_at: item.created_at,
            updated_at: item.updated_at,
            status: Some(item.status()),
        }
    }
}

impl TryFrom<InventoryRecord> for InventoryItem {
    type Error = InventoryError;

    fn try_from(record: InventoryRecord) -> Result<Self, Self::Error> {
        let details = ItemDetails {
            name: record.name,
            code: record.code,
            category: record.category,
            supplier: record.supplier,
            location: record.location,
            unit: record.unit,
            min_stock: record.min_stock,
            max_stock: record.max_stock,
            cost_per_unit: record.cost_per_unit,
            expiration_date: record.expiration_date,
        };
        details.validate()?;
        ensure_non_negative("current_stock", record.current_stock)?;
        Ok(Self {
            id: record.id,
            details,
            current_stock: record.current_stock,
            last_received: record.last_received,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flour() -> ItemDetails {
        ItemDetails {
            name: "Bread Flour".into(),
            code: "FLR-01".into(),
            category: "Dry Goods".into(),
            supplier: "Mill & Co".into(),
            location: "Pantry".into(),
            unit: "kg".into(),
            min_stock: 10.0,
            max_stock: Some(50.0),
            cost_per_unit: 2.0,
            expiration_date: None,
        }
    }

    #[test]
    fn create_defaults_to_zero_stock_and_out_of_stock() {
        let item = InventoryItem::create(InventoryItemId::generate(), NewInventoryItem::new(flour()), Utc::now())
            .unwrap();
        assert_eq!(item.current_stock(), 0.0);
        assert_eq!(item.status(), StockStatus::OutOfStock);
        assert_eq!(item.last_received(), None);
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut details = flour();
        details.name = "   ".into();
        let err = InventoryItem::create(InventoryItemId::generate(), NewInventoryItem::new(details), Utc::now())
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidItem(msg) if msg.contains("name")));
    }

    #[test]
    fn create_rejects_negative_opening_stock() {
        let draft = NewInventoryItem::new(flour()).with_opening_stock(-3.0);
        assert!(InventoryItem::create(InventoryItemId::generate(), draft, Utc::now()).is_err());
    }

    #[test]
    fn create_allows_max_not_above_min() {
        let mut details = flour();
        details.max_stock = Some(5.0);
        assert!(InventoryItem::create(InventoryItemId::generate(), NewInventoryItem::new(details), Utc::now()).is_ok());
    }

    #[test]
    fn record_carries_derived_status_and_restores_item() {
        let draft = NewInventoryItem::new(flour()).with_opening_stock(5.0);
        let item = InventoryItem::create(InventoryItemId::generate(), draft, Utc::now()).unwrap();

        let record = InventoryRecord::from(&item);
        assert_eq!(record.status, Some(StockStatus::LowStock));
        assert_eq!(record.stale_status(), None);

        let restored = InventoryItem::try_from(record).unwrap();
        assert_eq!(restored, item);
    }

    #[test]
    fn record_uses_camel_case_keys() {
        let item = InventoryItem::create(InventoryItemId::generate(), NewInventoryItem::new(flour()), Utc::now())
            .unwrap();
        let json = serde_json::to_value(InventoryRecord::from(&item)).unwrap();
        assert!(json.get("currentStock").is_some());
        assert!(json.get("costPerUnit").is_some());
        assert_eq!(json["status"], "out_of_stock");
    }

    #[test]
    fn stale_stored_status_is_detected() {
        let draft = NewInventoryItem::new(flour()).with_opening_stock(20.0);
        let item = InventoryItem::create(InventoryItemId::generate(), draft, Utc::now()).unwrap();
        let mut record = InventoryRecord::from(&item);
        record.status = Some(StockStatus::OutOfStock);

        assert_eq!(record.stale_status(), Some(StockStatus::OutOfStock));
        assert_eq!(InventoryItem::try_from(record).unwrap().status(), StockStatus::InStock);
    }
}
