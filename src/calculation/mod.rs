//! Calculation logic for the shift report engine.
//!
//! This module contains the pure, synchronous parts of the engine: raw value
//! coercion, base norm resolution and discounting, row normalization, and the
//! product and staffing aggregations that make up a shift summary.

mod coercion;
mod norm;
mod normalize;
mod product_summary;
mod shift_summary;
mod staffing_summary;

pub use coercion::{
    MAX_HOURS, ParsedInt, coerce_discount, coerce_employee_id, coerce_flag, coerce_hours,
    coerce_non_negative_int, parse_int,
};
pub use norm::{DEFAULT_REFERENCE_SHIFT_HOURS, norm_with_discount, resolve_base_norm, round_to_int};
pub use normalize::{normalize_row, normalize_rows};
pub use product_summary::{ProductSummaryResult, summarize_products};
pub use shift_summary::summarize_shift;
pub use staffing_summary::summarize_staffing;
