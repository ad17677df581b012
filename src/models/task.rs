//! Task row models.
//!
//! A task row exists in three shapes: the loosely typed [`RawTaskRow`] as
//! entered, the [`NormalizedRow`] with every derived field filled in, and the
//! validated [`TaskRecord`] that is persisted. Norm fields are never stored;
//! they are re-derived from the catalog whenever a row is normalized.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Line;

/// A task row as entered, before normalization.
///
/// Numeric fields are kept as raw JSON values so that blanks, strings and
/// nulls can be coerced in one place. Unknown fields are ignored.
///
/// # Example
///
/// ```
/// use shift_report::models::RawTaskRow;
///
/// let row: RawTaskRow = serde_json::from_str(
///     r#"{"sap_code": "P1", "qty_made": "7", "discount_percent": "", "row_id": 3}"#,
/// ).unwrap();
/// assert_eq!(row.product_code.as_deref(), Some("P1"));
/// assert!(row.count_by_norm.is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTaskRow {
    /// Product code, if any was selected.
    #[serde(default, alias = "sap_code")]
    pub product_code: Option<String>,
    /// Quantity produced.
    #[serde(default)]
    pub qty_made: Value,
    /// Discount percent.
    #[serde(default)]
    pub discount_percent: Value,
    /// Whether output is counted from the quantity made.
    #[serde(default)]
    pub count_by_norm: Value,
}

/// A task row with all derived fields resolved for its line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// The line the row was normalized for.
    pub line: Line,
    /// Product code, empty if none was given.
    pub product_code: String,
    /// Display name, empty on a catalog miss.
    pub product_name: String,
    /// Resolved base norm for the line, zero when unavailable.
    pub base_norm: Decimal,
    /// Discount percent in 0..=100.
    pub discount_percent: u8,
    /// Base norm after the discount, rounded to an integer.
    pub norm_with_discount: i64,
    /// Quantity produced.
    pub qty_made: u32,
    /// Whether output is counted from the quantity made.
    pub count_by_norm: bool,
    /// False when the code is unknown or the product has no norm on the line.
    pub producible: bool,
}

/// A validated task row, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Production line.
    pub line: Line,
    /// Product code, present in the catalog.
    pub product_code: String,
    /// Quantity produced.
    pub qty_made: u32,
    /// Whether output is counted from the quantity made.
    pub count_by_norm: bool,
    /// Discount percent in 0..=100.
    pub discount_percent: u8,
}

impl From<&TaskRecord> for RawTaskRow {
    fn from(record: &TaskRecord) -> Self {
        RawTaskRow {
            product_code: Some(record.product_code.clone()),
            qty_made: Value::from(record.qty_made),
            discount_percent: Value::from(record.discount_percent),
            count_by_norm: Value::Bool(record.count_by_norm),
        }
    }
}

impl From<&NormalizedRow> for RawTaskRow {
    fn from(row: &NormalizedRow) -> Self {
        RawTaskRow {
            product_code: Some(row.product_code.clone()).filter(|code| !code.is_empty()),
            qty_made: Value::from(row.qty_made),
            discount_percent: Value::from(row.discount_percent),
            count_by_norm: Value::Bool(row.count_by_norm),
        }
    }
}
