//! Coercion of loosely typed input values.
//!
//! Every numeric field that arrives as raw JSON (quantities, discounts,
//! hours, employee ids and flags) goes through this module. Null, blank and
//! unparsable values fall back to a default instead of failing.
//!
//! Integers are read the same way from numbers and from text: `30.5` and
//! `"30.5"` both read as 30. Hours are capped at [`MAX_HOURS`] so that sums
//! over a working set stay far from the decimal range.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;

/// Upper bound for hours read from a single entry.
pub const MAX_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// The outcome of reading an integer from a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInt {
    /// Null, blank text, or a non-finite number.
    Missing,
    /// A whole number. Fractional numbers and fractional text are truncated
    /// toward zero.
    Value(i64),
    /// Anything else, such as text that is not an integer.
    Invalid,
}

/// Reads an integer from a raw JSON value.
///
/// # Example
///
/// ```
/// use shift_report::calculation::{parse_int, ParsedInt};
/// use serde_json::json;
///
/// assert_eq!(parse_int(&json!(" 42 ")), ParsedInt::Value(42));
/// assert_eq!(parse_int(&json!(7.9)), ParsedInt::Value(7));
/// assert_eq!(parse_int(&json!("7.9")), ParsedInt::Value(7));
/// assert_eq!(parse_int(&json!("")), ParsedInt::Missing);
/// assert_eq!(parse_int(&json!("abc")), ParsedInt::Invalid);
/// ```
pub fn parse_int(value: &Value) -> ParsedInt {
    match value {
        Value::Null => ParsedInt::Missing,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                ParsedInt::Value(i)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => {
                        ParsedInt::Value(f.trunc() as i64)
                    }
                    Some(f) if f.is_finite() => ParsedInt::Invalid,
                    _ => ParsedInt::Missing,
                }
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                ParsedInt::Missing
            } else {
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| Decimal::from_str(trimmed).ok()?.trunc().to_i64())
                    .map(ParsedInt::Value)
                    .unwrap_or(ParsedInt::Invalid)
            }
        }
        _ => ParsedInt::Invalid,
    }
}

/// Coerces a raw value to a non-negative integer.
///
/// Missing, invalid and negative values yield `default`.
pub fn coerce_non_negative_int(value: &Value, default: u32) -> u32 {
    match parse_int(value) {
        ParsedInt::Value(i) => u32::try_from(i).unwrap_or(if i < 0 { default } else { u32::MAX }),
        ParsedInt::Missing | ParsedInt::Invalid => default,
    }
}

/// Coerces a raw discount to a percentage in `0..=100`.
///
/// Anything missing, invalid or out of range yields 0.
pub fn coerce_discount(value: &Value) -> u8 {
    match parse_int(value) {
        ParsedInt::Value(i) if (0..=100).contains(&i) => i as u8,
        _ => 0,
    }
}

/// Coerces raw hours to a non-negative decimal.
///
/// Accepts numbers and numeric text, with either `.` or `,` as the decimal
/// separator. Missing, invalid and negative values yield zero; anything above
/// [`MAX_HOURS`] is capped to it.
pub fn coerce_hours(value: &Value) -> Decimal {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(&s.trim().replace(',', ".")),
        _ => None,
    };

    match parsed {
        Some(hours) if hours > MAX_HOURS => MAX_HOURS,
        Some(hours) if hours > Decimal::ZERO => hours.normalize(),
        _ => Decimal::ZERO,
    }
}

/// Coerces a raw boolean flag, falling back to `default` when missing.
pub fn coerce_flag(value: &Value, default: bool) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(default),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => true,
            "false" | "no" | "0" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Reads an optional employee reference. Missing ids and id 0 mean the slot
/// is unfilled.
pub fn coerce_employee_id(value: &Value) -> Option<i64> {
    match parse_int(value) {
        ParsedInt::Value(id) if id != 0 => Some(id),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
