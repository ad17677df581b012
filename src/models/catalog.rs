//! Shared reference data: products, employees and sites.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Line;

/// A product catalog entry with its line-specific norms.
///
/// A missing norm means the product is not produced on that line.
///
/// # Example
///
/// ```
/// use shift_report::models::{CatalogEntry, Line};
/// use rust_decimal::Decimal;
///
/// let entry = CatalogEntry {
///     code: "P1".to_string(),
///     name: "Bracket".to_string(),
///     norm_a3: Some(Decimal::new(100, 0)),
///     norm_a4: None,
/// };
/// assert!(entry.is_produced_on(Line::A3));
/// assert!(!entry.is_produced_on(Line::A4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Norm per employee on line A3.
    #[serde(default)]
    pub norm_a3: Option<Decimal>,
    /// Norm per employee on line A4.
    #[serde(default)]
    pub norm_a4: Option<Decimal>,
}

impl CatalogEntry {
    /// Returns the catalog norm stored for a line, without any policy applied.
    pub fn norm_for(&self, line: Line) -> Option<Decimal> {
        match line {
            Line::A3 => self.norm_a3,
            Line::A4 => self.norm_a4,
        }
    }

    /// Returns true if the product has a norm on the given line.
    pub fn is_produced_on(&self, line: Line) -> bool {
        self.norm_for(line).is_some()
    }
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A production site. Reports are keyed by site and date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Site identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}
