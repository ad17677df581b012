//! Whole-shift summary over an in-memory working set.
//!
//! Staffing is summarized first so that its per-line hours can serve as the
//! divisor for the product table.

use tracing::debug;
use uuid::Uuid;

use crate::catalog::CatalogIndex;
use crate::config::CalculationSettings;
use crate::models::{Line, ShiftSummary, SupportLine, SupportRole, WorkingSet};

use super::coercion::{coerce_employee_id, coerce_hours};
use super::normalize::normalize_rows;
use super::product_summary::summarize_products;
use super::staffing_summary::summarize_staffing;

/// Computes both summary tables for a working set.
///
/// Task rows are normalized against the catalog before aggregation, so the
/// caller may pass rows exactly as entered. Filled support slots are listed
/// alongside the staffing table; their hours never count toward line hours.
///
/// # Example
///
/// ```
/// use shift_report::calculation::summarize_shift;
/// use shift_report::catalog::CatalogIndex;
/// use shift_report::config::CalculationSettings;
/// use shift_report::models::WorkingSet;
///
/// let summary = summarize_shift(
///     &WorkingSet::default(),
///     &CatalogIndex::default(),
///     &CalculationSettings::default(),
/// );
/// assert!(summary.products.is_empty());
/// assert_eq!(summary.staffing.total_count, 0);
/// ```
pub fn summarize_shift(
    working_set: &WorkingSet,
    catalog: &CatalogIndex,
    settings: &CalculationSettings,
) -> ShiftSummary {
    let summary_id = Uuid::new_v4();

    let staffing = summarize_staffing(&working_set.line_employees);
    let a3_rows = normalize_rows(Line::A3, &working_set.tasks_a3, catalog, settings);
    let a4_rows = normalize_rows(Line::A4, &working_set.tasks_a4, catalog, settings);
    let products = summarize_products(&a3_rows, &a4_rows, staffing.line_hours(), settings);

    let supports = working_set
        .supports
        .iter()
        .filter_map(|support| {
            let role = support.role.as_deref()?.parse::<SupportRole>().ok()?;
            let employee_id = coerce_employee_id(&support.employee_id)?;
            let name = catalog
                .lookup_employee(employee_id)
                .map(str::to_string)
                .or_else(|| support.name.clone())
                .unwrap_or_default();
            Some(SupportLine {
                role,
                name,
                hours: coerce_hours(&support.work_time),
            })
        })
        .collect();

    debug!(
        summary_id = %summary_id,
        products = products.products.len(),
        total_count = staffing.total_count,
        "Shift summary computed"
    );

    ShiftSummary {
        summary_id,
        products: products.products,
        staffing,
        supports,
        audit_steps: products.audit_steps,
    }
}
