//! Stock status derivation.
//!
//! Status is never stored as an independent fact: it is always a function of
//! the on-hand quantity and the par levels.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Derived classification of an item's on-hand quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    OverStock,
}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [
        StockStatus::InStock,
        StockStatus::LowStock,
        StockStatus::OutOfStock,
        StockStatus::OverStock,
    ];

    /// Stable machine code (matches the serde representation).
    pub fn code(self) -> &'static str {
        match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::OverStock => "over_stock",
        }
    }

    /// Human label, as shown in tables and exports.
    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::OverStock => "Over Stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StockStatus {
    type Err = InventoryError;

    /// Accepts either the code (`low_stock`) or the label (`Low Stock`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StockStatus::ALL
            .into_iter()
            .find(|st| st.code() == wanted || st.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InventoryError::invalid_item(format!("unknown stock status: {wanted:?}")))
    }
}

/// The quantities status derivation looks at.
///
/// `max` of `None` means the item has no upper par level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockLevels {
    pub current: f64,
    pub min: f64,
    pub max: Option<f64>,
}

/// Classify stock levels. First matching rule wins:
///
/// 1. `current == 0` → `OutOfStock`
/// 2. `current < min` → `LowStock`
/// 3. `max` finite and `current > max` → `OverStock`
/// 4. otherwise → `InStock`
///
/// Precondition: `current >= 0`. Callers clamp before calling; this function
/// does not.
pub fn derive_status(levels: StockLevels) -> StockStatus {
    if levels.current == 0.0 {
        return StockStatus::OutOfStock;
    }
    if levels.current < levels.min {
        return StockStatus::LowStock;
    }
    match levels.max {
        Some(max) if max.is_finite() && levels.current > max => StockStatus::OverStock,
        _ => StockStatus::InStock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn levels(current: f64, min: f64, max: Option<f64>) -> StockLevels {
        StockLevels { current, min, max }
    }

    #[test]
    fn zero_stock_with_zero_min_is_out_of_stock() {
        assert_eq!(derive_status(levels(0.0, 0.0, Some(10.0))), StockStatus::OutOfStock);
    }

    #[test]
    fn below_min_is_low_stock() {
        assert_eq!(derive_status(levels(5.0, 10.0, Some(50.0))), StockStatus::LowStock);
    }

    #[test]
    fn above_max_is_over_stock() {
        assert_eq!(derive_status(levels(60.0, 10.0, Some(50.0))), StockStatus::OverStock);
    }

    #[test]
    fn exactly_at_thresholds_is_in_stock() {
        assert_eq!(derive_status(levels(10.0, 10.0, Some(50.0))), StockStatus::InStock);
        assert_eq!(derive_status(levels(50.0, 10.0, Some(50.0))), StockStatus::InStock);
    }

    #[test]
    fn unbounded_max_never_over_stock() {
        assert_eq!(derive_status(levels(1e12, 10.0, None)), StockStatus::InStock);
        assert_eq!(derive_status(levels(1e12, 10.0, Some(f64::INFINITY))), StockStatus::InStock);
    }

    #[test]
    fn parses_codes_and_labels() {
        assert_eq!("low_stock".parse::<StockStatus>().unwrap(), StockStatus::LowStock);
        assert_eq!("Out of Stock".parse::<StockStatus>().unwrap(), StockStatus::OutOfStock);
        assert!("sold out".parse::<StockStatus>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: zero on hand dominates every other rule.
        #[test]
        fn zero_is_always_out_of_stock(
            min in 0.0f64..1_000.0,
            max in proptest::option::of(0.0f64..1_000.0),
        ) {
            prop_assert_eq!(derive_status(levels(0.0, min, max)), StockStatus::OutOfStock);
        }

        /// Property: strictly between zero and min is low stock, whatever max says.
        #[test]
        fn between_zero_and_min_is_low_stock(
            min in 1.0f64..1_000.0,
            frac in 0.001f64..0.999,
            max in proptest::option::of(0.0f64..1_000.0),
        ) {
            let current = min * frac;
            prop_assert_eq!(derive_status(levels(current, min, max)), StockStatus::LowStock);
        }

        /// Property: above a finite max (and not low) is over stock.
        #[test]
        fn above_max_is_over_stock_when_not_low(
            min in 0.0f64..100.0,
            span in 1.0f64..100.0,
            excess in 0.01f64..100.0,
        ) {
            let max = min + span;
            prop_assert_eq!(derive_status(levels(max + excess, min, Some(max))), StockStatus::OverStock);
        }
    }
}
