//! Base norm resolution and discount application.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{A3NormSource, CalculationSettings};
use crate::models::{CatalogEntry, Line};

/// Reference shift length in hours.
///
/// A row that is not counted from its quantity is credited with
/// `norm_with_discount / reference_shift_hours * line_hours` units.
pub const DEFAULT_REFERENCE_SHIFT_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Resolves the base norm of a product on a line.
///
/// This is the only place that decides where the A3 norm comes from; both
/// row normalization and report loading go through it. Returns `None` when
/// the product has no norm on the line.
///
/// # Example
///
/// ```
/// use shift_report::calculation::resolve_base_norm;
/// use shift_report::config::{A3NormSource, CalculationSettings};
/// use shift_report::models::{CatalogEntry, Line};
/// use rust_decimal::Decimal;
///
/// let entry = CatalogEntry {
///     code: "P1".to_string(),
///     name: "Bracket".to_string(),
///     norm_a3: Some(Decimal::new(100, 0)),
///     norm_a4: Some(Decimal::new(120, 0)),
/// };
///
/// let dedicated = CalculationSettings::default();
/// assert_eq!(resolve_base_norm(&entry, Line::A3, &dedicated), Some(Decimal::new(100, 0)));
///
/// let scaled = CalculationSettings {
///     a3_norm_source: A3NormSource::Scaled { factor: Decimal::new(7, 1) },
///     ..CalculationSettings::default()
/// };
/// assert_eq!(resolve_base_norm(&entry, Line::A3, &scaled), Some(Decimal::new(70, 0)));
/// assert_eq!(resolve_base_norm(&entry, Line::A4, &scaled), Some(Decimal::new(120, 0)));
/// ```
pub fn resolve_base_norm(
    entry: &CatalogEntry,
    line: Line,
    settings: &CalculationSettings,
) -> Option<Decimal> {
    let norm = entry.norm_for(line)?;
    match (line, settings.a3_norm_source) {
        (Line::A3, A3NormSource::Scaled { factor }) => {
            Some(round_half_even(norm.saturating_mul(factor)))
        }
        _ => Some(norm),
    }
}

/// Applies a discount to a base norm: `round(base * (1 - discount / 100))`.
///
/// Uses exact decimal arithmetic with round-half-to-even.
pub fn norm_with_discount(base_norm: Decimal, discount_percent: u8) -> i64 {
    let factor = Decimal::ONE - Decimal::from(discount_percent) / ONE_HUNDRED;
    round_to_int(base_norm * factor)
}

/// Rounds a decimal to the nearest integer, ties to even. Values outside the
/// `i64` range saturate.
pub fn round_to_int(value: Decimal) -> i64 {
    round_half_even(value).to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn round_half_even(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}
