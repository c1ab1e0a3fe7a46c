//! Aggregate statistics over a set of items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;
use crate::status::StockStatus;

/// Default "expiring soon" window, in whole days from today (inclusive).
pub const EXPIRING_SOON_DAYS: i64 = 3;

/// Where an item's expiration date falls relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryClass {
    NoExpiry,
    /// Already past. Not counted anywhere in [`InventoryStats`].
    Expired,
    ExpiringSoon,
    Fresh,
}

pub fn expiry_class(expiration: Option<NaiveDate>, today: NaiveDate, window_days: i64) -> ExpiryClass {
    let Some(date) = expiration else {
        return ExpiryClass::NoExpiry;
    };
    let days_left = (date - today).num_days();
    if days_left < 0 {
        ExpiryClass::Expired
    } else if days_left <= window_days {
        ExpiryClass::ExpiringSoon
    } else {
        ExpiryClass::Fresh
    }
}

/// Dashboard counters. Every count uses freshly derived status.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_items: usize,
    pub in_stock_count: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub over_stock_count: usize,
    pub total_value: f64,
    pub expiring_soon_count: usize,
}

impl InventoryStats {
    pub fn count_for(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::InStock => self.in_stock_count,
            StockStatus::LowStock => self.low_stock_count,
            StockStatus::OutOfStock => self.out_of_stock_count,
            StockStatus::OverStock => self.over_stock_count,
        }
    }
}

pub fn summarize<'a>(items: impl IntoIterator<Item = &'a InventoryItem>, today: NaiveDate) -> InventoryStats {
    summarize_with_window(items, today, EXPIRING_SOON_DAYS)
}

pub fn summarize_with_window<'a>(
    items: impl IntoIterator<Item = &'a InventoryItem>,
    today: NaiveDate,
    window_days: i64,
) -> InventoryStats {
    items.into_iter().fold(InventoryStats::default(), |mut stats, item| {
        stats.total_items += 1;
        match item.status() {
            StockStatus::InStock => stats.in_stock_count += 1,
            StockStatus::LowStock => stats.low_stock_count += 1,
            StockStatus::OutOfStock => stats.out_of_stock_count += 1,
            StockStatus::OverStock => stats.over_stock_count += 1,
        }
        stats.total_value += item.valuation();
        if expiry_class(item.expiration_date(), today, window_days) == ExpiryClass::ExpiringSoon {
            stats.expiring_soon_count += 1;
        }
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::create_item;
    use crate::item::{InventoryItemId, ItemDetails, NewInventoryItem};
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn item(stock: f64, cost: f64, expires_in: Option<i64>) -> InventoryItem {
        let details = ItemDetails {
            name: "Shallots".into(),
            category: "Produce".into(),
            unit: "lbs".into(),
            min_stock: 10.0,
            max_stock: Some(50.0),
            cost_per_unit: cost,
            expiration_date: expires_in.map(|d| today() + chrono::Duration::days(d)),
            ..ItemDetails::default()
        };
        let draft = NewInventoryItem::new(details).with_opening_stock(stock);
        create_item(InventoryItemId::generate(), draft, Utc::now()).unwrap().item
    }

    #[test]
    fn counts_each_status_once() {
        let items = vec![item(0.0, 1.0, None), item(5.0, 1.0, None), item(20.0, 1.0, None)];
        let stats = summarize(&items, today());
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.out_of_stock_count, 1);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.in_stock_count, 1);
        assert_eq!(stats.over_stock_count, 0);
        assert_eq!(stats.count_for(StockStatus::LowStock), 1);
    }

    #[test]
    fn total_value_sums_valuations() {
        let items = vec![item(5.0, 2.0, None), item(20.0, 0.25, None)];
        assert_eq!(summarize(&items, today()).total_value, 15.0);
    }

    #[test]
    fn expiring_soon_window_is_inclusive_and_skips_expired() {
        let items = vec![
            item(20.0, 1.0, Some(0)),
            item(20.0, 1.0, Some(3)),
            item(20.0, 1.0, Some(4)),
            item(20.0, 1.0, Some(-1)),
            item(20.0, 1.0, None),
        ];
        assert_eq!(summarize(&items, today()).expiring_soon_count, 2);
        assert_eq!(summarize_with_window(&items, today(), 7).expiring_soon_count, 3);
    }

    #[test]
    fn classifies_expiry() {
        let d = |n| Some(today() + chrono::Duration::days(n));
        assert_eq!(expiry_class(None, today(), 3), ExpiryClass::NoExpiry);
        assert_eq!(expiry_class(d(-2), today(), 3), ExpiryClass::Expired);
        assert_eq!(expiry_class(d(1), today(), 3), ExpiryClass::ExpiringSoon);
        assert_eq!(expiry_class(d(30), today(), 3), ExpiryClass::Fresh);
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize(Vec::<InventoryItem>::new().iter(), today()), InventoryStats::default());
    }
}
