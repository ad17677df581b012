//! In-memory catalog index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{CatalogEntry, Employee, Line};

/// Product counts per line, as shown on the catalog page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAvailability {
    /// Number of products in the catalog.
    pub total: usize,
    /// Products with an A3 norm.
    pub on_a3: usize,
    /// Products with an A4 norm.
    pub on_a4: usize,
}

/// Lookup tables over products and employees.
///
/// Lookup misses are never errors; callers decide what a miss means.
///
/// # Example
///
/// ```
/// use shift_report::catalog::CatalogIndex;
/// use shift_report::models::{CatalogEntry, Employee, Line};
/// use rust_decimal::Decimal;
///
/// let index = CatalogIndex::new(
///     vec![CatalogEntry {
///         code: "P1".to_string(),
///         name: "Bracket".to_string(),
///         norm_a3: Some(Decimal::new(100, 0)),
///         norm_a4: None,
///     }],
///     vec![Employee { id: 7, name: "Ivanova A.".to_string() }],
/// );
///
/// assert_eq!(index.lookup_product("P1").map(|p| p.name.as_str()), Some("Bracket"));
/// assert_eq!(index.lookup_employee(7), Some("Ivanova A."));
/// assert!(index.available_codes(Line::A4).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    products: HashMap<String, CatalogEntry>,
    employees: HashMap<i64, String>,
}

impl CatalogIndex {
    /// Builds an index from catalog rows. Later duplicates of a key win.
    pub fn new(products: Vec<CatalogEntry>, employees: Vec<Employee>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|entry| (entry.code.clone(), entry))
                .collect(),
            employees: employees.into_iter().map(|e| (e.id, e.name)).collect(),
        }
    }

    /// Looks up a product by code.
    pub fn lookup_product(&self, code: &str) -> Option<&CatalogEntry> {
        self.products.get(code)
    }

    /// Looks up an employee's display name.
    pub fn lookup_employee(&self, id: i64) -> Option<&str> {
        self.employees.get(&id).map(String::as_str)
    }

    /// Returns the sorted codes of products that have a norm on `line`.
    pub fn available_codes(&self, line: Line) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .products
            .values()
            .filter(|entry| entry.is_produced_on(line))
            .map(|entry| entry.code.as_str())
            .collect();
        codes.sort_unstable();
        codes
    }

    /// Returns catalog entries sorted by code, optionally only those
    /// produced on `line`.
    pub fn products(&self, line: Option<Line>) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self
            .products
            .values()
            .filter(|entry| line.is_none_or(|l| entry.is_produced_on(l)))
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// Counts products overall and per line.
    pub fn availability(&self) -> CatalogAvailability {
        self.products
            .values()
            .fold(CatalogAvailability::default(), |mut acc, entry| {
                acc.total += 1;
                if entry.is_produced_on(Line::A3) {
                    acc.on_a3 += 1;
                }
                if entry.is_produced_on(Line::A4) {
                    acc.on_a4 += 1;
                }
                acc
            })
    }
}
