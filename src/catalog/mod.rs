//! Read-only reference data lookups.
//!
//! A [`CatalogIndex`] is a snapshot of the product catalog and the employee
//! list, built once per request or report load and never mutated.

mod index;

pub use index::{CatalogAvailability, CatalogIndex};
