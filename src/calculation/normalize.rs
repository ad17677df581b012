//! Task row normalization.
//!
//! Turns a raw entry row into a [`NormalizedRow`] by resolving the product
//! against the catalog and filling every derived field.

use rust_decimal::Decimal;

use crate::catalog::CatalogIndex;
use crate::config::CalculationSettings;
use crate::models::{Line, NormalizedRow, RawTaskRow};

use super::coercion::{coerce_discount, coerce_flag, coerce_non_negative_int};
use super::norm::{norm_with_discount, resolve_base_norm};

/// Normalizes a raw task row for a line.
///
/// - A known code fills the display name and the line's base norm. If the
///   product has no norm on the line, the base norm is 0, the name is
///   annotated with `(not produced on <line>)` and the row is not producible.
/// - A missing, blank or unknown code leaves the name empty and the base norm 0.
/// - Quantity is coerced to a non-negative integer, discount to `0..=100`
///   (anything else becomes 0) and `count_by_norm` defaults to true.
///
/// Never fails.
///
/// # Example
///
/// ```
/// use shift_report::calculation::normalize_row;
/// use shift_report::catalog::CatalogIndex;
/// use shift_report::config::CalculationSettings;
/// use shift_report::models::{CatalogEntry, Line, RawTaskRow};
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let catalog = CatalogIndex::new(
///     vec![CatalogEntry {
///         code: "P1".to_string(),
///         name: "Bracket".to_string(),
///         norm_a3: Some(Decimal::new(100, 0)),
///         norm_a4: Some(Decimal::new(120, 0)),
///     }],
///     vec![],
/// );
/// let raw = RawTaskRow {
///     product_code: Some("P1".to_string()),
///     qty_made: json!(7),
///     discount_percent: json!(30),
///     count_by_norm: json!(false),
/// };
///
/// let row = normalize_row(Line::A3, &raw, &catalog, &CalculationSettings::default());
/// assert_eq!(row.norm_with_discount, 70);
/// assert_eq!(row.product_name, "Bracket");
/// ```
pub fn normalize_row(
    line: Line,
    raw: &RawTaskRow,
    catalog: &CatalogIndex,
    settings: &CalculationSettings,
) -> NormalizedRow {
    let code = raw
        .product_code
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let (product_name, base_norm, producible) = match catalog.lookup_product(&code) {
        Some(entry) => match resolve_base_norm(entry, line, settings) {
            Some(norm) => (entry.name.clone(), norm, true),
            None => (
                format!("{} (not produced on {})", entry.name, line),
                Decimal::ZERO,
                false,
            ),
        },
        None => (String::new(), Decimal::ZERO, false),
    };

    let discount_percent = coerce_discount(&raw.discount_percent);

    NormalizedRow {
        line,
        product_code: code,
        product_name,
        base_norm,
        discount_percent,
        norm_with_discount: norm_with_discount(base_norm, discount_percent),
        qty_made: coerce_non_negative_int(&raw.qty_made, 0),
        count_by_norm: coerce_flag(&raw.count_by_norm, true),
        producible,
    }
}

/// Normalizes every row of a line.
pub fn normalize_rows(
    line: Line,
    rows: &[RawTaskRow],
    catalog: &CatalogIndex,
    settings: &CalculationSettings,
) -> Vec<NormalizedRow> {
    rows.iter()
        .map(|raw| normalize_row(line, raw, catalog, settings))
        .collect()
}
