//! Table filtering: free-text search, category and derived status.

use serde::{Deserialize, Serialize};

use crate::item::InventoryItem;
use crate::status::StockStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryFilter {
    /// Case-insensitive substring of name, code or supplier.
    pub search: Option<String>,
    /// Exact category match (case-insensitive).
    pub category: Option<String>,
    pub status: Option<StockStatus>,
}

impl InventoryFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let d = item.details();
            let hit = [&d.name, &d.code, &d.supplier]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !item.category().eq_ignore_ascii_case(category) {
                return false;
            }
        }
        self.status.is_none_or(|status| item.status() == status)
    }

    pub fn apply<'a>(&self, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Distinct non-empty categories, sorted, for filter dropdowns.
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut out: Vec<String> = items
        .iter()
        .map(|i| i.category().trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}
