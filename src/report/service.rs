//! The report service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::calculation::{normalize_row, normalize_rows, summarize_shift};
use crate::catalog::CatalogIndex;
use crate::config::CalculationSettings;
use crate::error::{ReportError, ReportResult};
use crate::models::{
    Employee, Line, NormalizedRow, RawTaskRow, Report, ReportDraft, ShiftSummary, Site,
    StoredReport, WorkingSet,
};
use crate::storage::ReportStore;
use crate::validation::validate_draft;

/// Builds a [`Report`] from stored rows and a catalog snapshot.
///
/// Norm fields are re-derived with the same rules as row normalization, and
/// display names of assigned employees are refreshed from the catalog. Names
/// of employees missing from the catalog keep their stored value.
pub fn enrich_report(
    stored: StoredReport,
    catalog: &CatalogIndex,
    settings: &CalculationSettings,
) -> Report {
    let refresh = |id: Option<i64>, name: String| {
        id.and_then(|id| catalog.lookup_employee(id))
            .map(str::to_string)
            .unwrap_or(name)
    };

    let tasks = stored
        .content
        .tasks
        .iter()
        .map(|record| normalize_row(record.line, &RawTaskRow::from(record), catalog, settings))
        .collect();

    let line_employees = stored
        .content
        .line_employees
        .into_iter()
        .map(|mut assignment| {
            assignment.name = refresh(assignment.employee_id, assignment.name);
            assignment
        })
        .collect();

    let mut supports = stored.content.supports;
    supports.senior.name = refresh(supports.senior.employee_id, supports.senior.name);
    supports.repair.name = refresh(supports.repair.employee_id, supports.repair.name);

    Report {
        id: stored.id,
        site_id: stored.site_id,
        report_date: stored.report_date,
        tasks,
        line_employees,
        supports,
    }
}

/// Loads, saves and deletes reports, and computes summaries against the
/// stored catalog.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use shift_report::config::CalculationSettings;
/// use shift_report::models::{ReportDraft, Site};
/// use shift_report::report::ReportService;
/// use shift_report::storage::{ReportStore, SqliteStore};
///
/// let store = SqliteStore::open_in_memory()?;
/// store.upsert_sites(&[Site { id: 1, name: "North Plant".to_string() }])?;
///
/// let service = ReportService::new(Arc::new(store), CalculationSettings::default());
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
///
/// let saved = service.save(1, date, &ReportDraft::default())?;
/// assert!(saved.tasks.is_empty());
/// assert!(service.delete(1, date)?);
/// # Ok::<(), shift_report::error::ReportError>(())
/// ```
#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    settings: CalculationSettings,
}

impl ReportService {
    /// Creates a service over a store.
    pub fn new(store: Arc<dyn ReportStore>, settings: CalculationSettings) -> Self {
        Self { store, settings }
    }

    /// Returns the calculation settings in use.
    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn ReportStore> {
        &self.store
    }

    /// Builds a catalog snapshot from the store.
    pub fn catalog(&self) -> ReportResult<CatalogIndex> {
        Ok(CatalogIndex::new(
            self.store.list_products()?,
            self.store.list_employees()?,
        ))
    }

    /// Lists the sites reports can be filed for.
    pub fn sites(&self) -> ReportResult<Vec<Site>> {
        self.store.list_sites()
    }

    /// Lists employees, ordered by name.
    pub fn employees(&self) -> ReportResult<Vec<Employee>> {
        self.store.list_employees()
    }

    /// Loads the report for (site, date), or `None` if none was saved.
    pub fn load(&self, site_id: i64, date: NaiveDate) -> ReportResult<Option<Report>> {
        let Some(snapshot) = self.store.read_report_snapshot(site_id, date)? else {
            debug!(site_id, date = %date, "No report stored");
            return Ok(None);
        };

        let catalog = CatalogIndex::new(snapshot.products, snapshot.employees);
        Ok(Some(enrich_report(snapshot.report, &catalog, &self.settings)))
    }

    /// Validates a draft and replaces the stored report for (site, date).
    ///
    /// Returns the report as read back after the save.
    ///
    /// # Errors
    ///
    /// Any validation error from [`validate_draft`], [`ReportError::UnknownSite`]
    /// if the site does not exist, or a storage failure.
    pub fn save(&self, site_id: i64, date: NaiveDate, draft: &ReportDraft) -> ReportResult<Report> {
        if !self.sites()?.iter().any(|site| site.id == site_id) {
            return Err(ReportError::UnknownSite { site_id });
        }

        let catalog = self.catalog()?;
        let validated = validate_draft(draft, &catalog)?;
        let report_id = self.store.save_report(site_id, date, &validated)?;

        info!(
            report_id,
            site_id,
            date = %date,
            tasks = validated.tasks.len(),
            line_employees = validated.line_employees.len(),
            "Report saved"
        );

        self.load(site_id, date)?.ok_or_else(|| ReportError::Storage {
            message: format!("report {} missing after save", report_id),
        })
    }

    /// Deletes the report for (site, date). Returns false if none existed.
    pub fn delete(&self, site_id: i64, date: NaiveDate) -> ReportResult<bool> {
        let deleted = self.store.delete_report(site_id, date)?;
        info!(site_id, date = %date, deleted, "Report delete requested");
        Ok(deleted)
    }

    /// Normalizes raw rows for a line against the stored catalog.
    pub fn normalize(&self, line: Line, rows: &[RawTaskRow]) -> ReportResult<Vec<NormalizedRow>> {
        let catalog = self.catalog()?;
        Ok(normalize_rows(line, rows, &catalog, &self.settings))
    }

    /// Summarizes a working set against the stored catalog.
    pub fn summarize(&self, working_set: &WorkingSet) -> ReportResult<ShiftSummary> {
        let catalog = self.catalog()?;
        Ok(summarize_shift(working_set, &catalog, &self.settings))
    }
}
