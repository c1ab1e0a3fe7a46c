//! CSV and JSON export of an item list.
//!
//! Column order is fixed. CSV output goes through the `csv` writer, so fields
//! containing a comma, quote or newline are quoted; every other field is
//! written bare, byte-for-byte what a plain comma join would produce.

use std::io::Write;

use chrono::SecondsFormat;
use thiserror::Error;

use crate::item::{InventoryItem, InventoryRecord};

pub const CSV_HEADER: [&str; 10] = [
    "Name",
    "Category",
    "Current Stock",
    "Unit",
    "Min Stock",
    "Max Stock",
    "Cost Per Unit",
    "Total Value",
    "Status",
    "Last Updated",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export produced invalid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

fn to_row(item: &InventoryItem) -> [String; 10] {
    [
        item.name().to_string(),
        item.category().to_string(),
        item.current_stock().to_string(),
        item.unit().to_string(),
        item.min_stock().to_string(),
        item.max_stock().map(|m| m.to_string()).unwrap_or_default(),
        format!("{:.2}", item.cost_per_unit()),
        format!("{:.2}", item.valuation()),
        item.status().label().to_string(),
        item.updated_at().to_rfc3339_opts(SecondsFormat::Secs, true),
    ]
}

pub fn export_csv<'a, W: Write>(
    items: impl IntoIterator<Item = &'a InventoryItem>,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for item in items {
        wtr.write_record(&to_row(item))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv_string<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    export_csv(items, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Pretty-printed JSON array of [`InventoryRecord`]s.
pub fn export_json<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Result<String, ExportError> {
    let records: Vec<InventoryRecord> = items.into_iter().map(InventoryRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::create_item;
    use crate::item::{InventoryItemId, ItemDetails, NewInventoryItem};
    use chrono::{TimeZone, Utc};

    fn item(name: &str, supplier: &str, stock: f64, max: Option<f64>) -> InventoryItem {
        let details = ItemDetails {
            name: name.into(),
            category: "Proteins".into(),
            supplier: supplier.into(),
            unit: "lbs".into(),
            min_stock: 10.0,
            max_stock: max,
            cost_per_unit: 2.5,
            ..ItemDetails::default()
        };
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap();
        let draft = NewInventoryItem::new(details).with_opening_stock(stock);
        create_item(InventoryItemId::generate(), draft, at).unwrap().item
    }

    #[test]
    fn writes_header_then_one_row_per_item() {
        let items = vec![item("Chicken Thigh", "Blue Ridge", 25.0, Some(50.0)), item("Duck", "Blue Ridge", 4.0, None)];
        let csv = export_csv_string(&items).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Name,Category,Current Stock,Unit,Min Stock,Max Stock,Cost Per Unit,Total Value,Status,Last Updated"
        );
        assert_eq!(lines[1], "Chicken Thigh,Proteins,25,lbs,10,50,2.50,62.50,In Stock,2026-10-19T08:15:00Z");
        assert_eq!(lines[2], "Duck,Proteins,4,lbs,10,,2.50,10.00,Low Stock,2026-10-19T08:15:00Z");
    }

    #[test]
    fn embedded_commas_are_quoted() {
        let items = vec![item("Salt, Kosher", "x", 12.0, None)];
        let csv = export_csv_string(&items).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("\"Salt, Kosher\",Proteins,"));
    }

    #[test]
    fn json_export_is_an_array_of_records() {
        let items = vec![item("Chicken Thigh", "Blue Ridge", 25.0, Some(50.0))];
        let json: serde_json::Value = serde_json::from_str(&export_json(&items).unwrap()).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["name"], "Chicken Thigh");
        assert_eq!(arr[0]["supplier"], "Blue Ridge");
        assert_eq!(arr[0]["status"], "in_stock");
    }
}
