//! Persistence for reference data and shift reports.
//!
//! [`ReportStore`] is the contract the report service depends on;
//! [`SqliteStore`] implements it on a single SQLite connection.

mod sqlite;

use chrono::NaiveDate;

use crate::config::CatalogSeed;
use crate::error::ReportResult;
use crate::models::{CatalogEntry, Employee, Site, StoredReport, ValidatedReport};

pub use sqlite::SqliteStore;

/// A stored report together with the reference data needed to enrich it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSnapshot {
    /// The stored report rows.
    pub report: StoredReport,
    /// Product catalog at the time of the read.
    pub products: Vec<CatalogEntry>,
    /// Employees at the time of the read.
    pub employees: Vec<Employee>,
}

/// Persistence contract for catalogs and reports.
///
/// Reports are keyed by (site, date). Saving replaces every child row of the
/// report atomically; reference data is never modified by a report save.
pub trait ReportStore: Send + Sync {
    /// Lists all catalog products.
    fn list_products(&self) -> ReportResult<Vec<CatalogEntry>>;

    /// Lists all employees.
    fn list_employees(&self) -> ReportResult<Vec<Employee>>;

    /// Lists all sites.
    fn list_sites(&self) -> ReportResult<Vec<Site>>;

    /// Returns the id of the report for (site, date), if one exists.
    fn find_report_id(&self, site_id: i64, date: NaiveDate) -> ReportResult<Option<i64>>;

    /// Upserts the report header and replaces all of its children in one
    /// transaction. Returns the report id.
    fn save_report(&self, site_id: i64, date: NaiveDate, report: &ValidatedReport)
    -> ReportResult<i64>;

    /// Reads the stored rows of a report.
    fn read_report(&self, site_id: i64, date: NaiveDate) -> ReportResult<Option<StoredReport>>;

    /// Deletes a report and its children. Returns false if none existed.
    fn delete_report(&self, site_id: i64, date: NaiveDate) -> ReportResult<bool>;

    /// Inserts or updates products by code. Products with no norm on either
    /// line are skipped. Returns the number written.
    fn upsert_products(&self, products: &[CatalogEntry]) -> ReportResult<usize>;

    /// Inserts or updates employees by id. Returns the number written.
    fn upsert_employees(&self, employees: &[Employee]) -> ReportResult<usize>;

    /// Inserts or updates sites by id. Returns the number written.
    fn upsert_sites(&self, sites: &[Site]) -> ReportResult<usize>;

    /// Reads a report along with the current catalog.
    fn read_report_snapshot(
        &self,
        site_id: i64,
        date: NaiveDate,
    ) -> ReportResult<Option<ReportSnapshot>> {
        let Some(report) = self.read_report(site_id, date)? else {
            return Ok(None);
        };
        Ok(Some(ReportSnapshot {
            report,
            products: self.list_products()?,
            employees: self.list_employees()?,
        }))
    }
}

/// Loads a catalog seed into a store. Existing rows with the same keys are
/// overwritten.
pub fn seed_catalog(store: &dyn ReportStore, seed: &CatalogSeed) -> ReportResult<()> {
    let sites = store.upsert_sites(&seed.sites)?;
    let products = store.upsert_products(&seed.products)?;
    let employees = store.upsert_employees(&seed.employees)?;
    tracing::info!(sites, products, employees, "Catalog seed loaded");
    Ok(())
}
