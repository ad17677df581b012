//! Validation of report drafts before persistence.
//!
//! Structural problems (an unknown line or role, an out-of-range discount,
//! duplicate assignments) reject the whole draft. Everything else is coerced
//! permissively: blank numbers become 0, blank or negative hours become 0,
//! and a missing employee id leaves the row unfilled.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::calculation::{
    ParsedInt, coerce_employee_id, coerce_flag, coerce_hours, coerce_non_negative_int, parse_int,
};
use crate::catalog::CatalogIndex;
use crate::error::{ReportError, ReportResult};
use crate::models::{
    Line, LineEmployeeAssignment, LineEmployeeInput, ReportDraft, SupportAssignment,
    SupportInput, SupportRole, SupportSlots, TaskInput, TaskRecord, ValidatedReport,
};

/// Validates a draft and coerces it into its persisted shape.
///
/// Task rows whose product code is blank or not in the catalog are dropped,
/// since a saved task must reference a catalog product. Display names of
/// assigned employees are taken from the employee catalog when known.
///
/// # Errors
///
/// - [`ReportError::InvalidLine`] for a task or assignment line outside {A3, A4}
/// - [`ReportError::InvalidRole`] for a support role outside {senior, repair}
/// - [`ReportError::InvalidDiscount`] for a discount that is not blank and
///   not a whole number in 0..=100
/// - [`ReportError::DuplicateLineAssignment`] when an employee appears twice
///   on one line
/// - [`ReportError::DuplicateSupportRole`] when a role is supplied twice
///
/// # Example
///
/// ```
/// use shift_report::catalog::CatalogIndex;
/// use shift_report::models::{ReportDraft, TaskInput, RawTaskRow};
/// use shift_report::validation::validate_draft;
/// use serde_json::json;
///
/// let draft = ReportDraft {
///     tasks: vec![TaskInput {
///         line: Some("A5".to_string()),
///         row: RawTaskRow::default(),
///     }],
///     ..ReportDraft::default()
/// };
///
/// assert!(validate_draft(&draft, &CatalogIndex::default()).is_err());
/// ```
pub fn validate_draft(draft: &ReportDraft, catalog: &CatalogIndex) -> ReportResult<ValidatedReport> {
    let mut tasks = Vec::with_capacity(draft.tasks.len());
    for task in &draft.tasks {
        if let Some(record) = validate_task(task, catalog)? {
            tasks.push(record);
        }
    }

    let line_employees = validate_line_employees(&draft.line_employees, catalog)?;
    let supports = validate_supports(&draft.supports, catalog)?;

    Ok(ValidatedReport {
        tasks,
        line_employees,
        supports,
    })
}

fn parse_line(value: Option<&str>) -> ReportResult<Line> {
    value
        .ok_or_else(|| ReportError::InvalidLine {
            value: String::new(),
        })?
        .parse()
}

fn validate_discount(value: &Value) -> ReportResult<u8> {
    let rejected = || ReportError::InvalidDiscount {
        value: match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    };

    match parse_int(value) {
        ParsedInt::Missing => Ok(0),
        ParsedInt::Value(d) => u8::try_from(d)
            .ok()
            .filter(|d| *d <= 100)
            .ok_or_else(rejected),
        ParsedInt::Invalid => Err(rejected()),
    }
}

fn validate_task(task: &TaskInput, catalog: &CatalogIndex) -> ReportResult<Option<TaskRecord>> {
    let line = parse_line(task.line.as_deref())?;
    let discount_percent = validate_discount(&task.row.discount_percent)?;

    let code = task.row.product_code.as_deref().map(str::trim).unwrap_or_default();
    if code.is_empty() || catalog.lookup_product(code).is_none() {
        debug!(line = %line, product_code = code, "Dropping task row without a catalog product");
        return Ok(None);
    }

    Ok(Some(TaskRecord {
        line,
        product_code: code.to_string(),
        qty_made: coerce_non_negative_int(&task.row.qty_made, 0),
        count_by_norm: coerce_flag(&task.row.count_by_norm, true),
        discount_percent,
    }))
}

fn display_name(employee_id: Option<i64>, entered: Option<&str>, catalog: &CatalogIndex) -> String {
    employee_id
        .and_then(|id| catalog.lookup_employee(id))
        .or(entered)
        .unwrap_or_default()
        .to_string()
}

fn validate_line_employees(
    inputs: &[LineEmployeeInput],
    catalog: &CatalogIndex,
) -> ReportResult<Vec<LineEmployeeAssignment>> {
    let mut seen: HashSet<(i64, Line)> = HashSet::new();
    let mut assignments = Vec::with_capacity(inputs.len());

    for input in inputs {
        let line = parse_line(input.line.as_deref())?;
        let employee_id = coerce_employee_id(&input.employee_id);

        if let Some(id) = employee_id {
            if !seen.insert((id, line)) {
                return Err(ReportError::DuplicateLineAssignment {
                    employee_id: id,
                    line,
                });
            }
        }

        assignments.push(LineEmployeeAssignment {
            employee_id,
            name: display_name(employee_id, input.name.as_deref(), catalog),
            work_time: coerce_hours(&input.work_time),
            line,
        });
    }

    Ok(assignments)
}

fn validate_supports(inputs: &[SupportInput], catalog: &CatalogIndex) -> ReportResult<SupportSlots> {
    let mut slots = SupportSlots::default();
    let mut seen: HashSet<SupportRole> = HashSet::new();

    for input in inputs {
        let role: SupportRole = input
            .role
            .as_deref()
            .ok_or_else(|| ReportError::InvalidRole {
                value: String::new(),
            })?
            .parse()?;

        if !seen.insert(role) {
            return Err(ReportError::DuplicateSupportRole { role });
        }

        let employee_id = coerce_employee_id(&input.employee_id);
        *slots.get_mut(role) = match employee_id {
            Some(_) => SupportAssignment {
                role,
                employee_id,
                name: display_name(employee_id, input.name.as_deref(), catalog),
                work_time: coerce_hours(&input.work_time),
            },
            None => SupportAssignment::unfilled(role),
        };
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogEntry, Employee, RawTaskRow};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn catalog() -> CatalogIndex {
        CatalogIndex::new(
            vec![CatalogEntry {
                code: "P1".to_string(),
                name: "Bracket".to_string(),
                norm_a3: Some(Decimal::new(100, 0)),
                norm_a4: Some(Decimal::new(120, 0)),
            }],
            vec![Employee {
                id: 101,
                name: "Ivanova A.".to_string(),
            }],
        )
    }

    fn task(line: &str, code: &str, discount: Value) -> TaskInput {
        TaskInput {
            line: Some(line.to_string()),
            row: RawTaskRow {
                product_code: Some(code.to_string()),
                qty_made: json!(5),
                discount_percent: discount,
                count_by_norm: Value::Null,
            },
        }
    }

    fn line_employee(id: Value, line: &str, hours: Value) -> LineEmployeeInput {
        LineEmployeeInput {
            employee_id: id,
            name: None,
            work_time: hours,
            line: Some(line.to_string()),
        }
    }

    fn support(role: &str, id: Value) -> SupportInput {
        SupportInput {
            role: Some(role.to_string()),
            employee_id: id,
            name: None,
            work_time: json!(12),
        }
    }

    #[test]
    fn test_valid_draft_is_coerced() {
        let draft = ReportDraft {
            tasks: vec![task("A3", "P1", json!("")), task("a4", " P1 ", json!(25))],
            line_employees: vec![line_employee(json!(101), "A3", json!("8"))],
            supports: vec![support("senior", json!(101))],
        };

        let report = validate_draft(&draft, &catalog()).unwrap();

        assert_eq!(report.tasks.len(), 2);
        assert_eq!(report.tasks[0].discount_percent, 0);
        assert!(report.tasks[0].count_by_norm);
        assert_eq!(report.tasks[1].line, Line::A4);
        assert_eq!(report.tasks[1].product_code, "P1");
        assert_eq!(report.tasks[1].discount_percent, 25);
        assert_eq!(report.line_employees[0].name, "Ivanova A.");
        assert_eq!(report.line_employees[0].work_time, Decimal::new(8, 0));
        assert!(report.supports.senior.is_filled());
        assert!(!report.supports.repair.is_filled());
    }

    #[test]
    fn test_rejects_unknown_task_line() {
        let draft = ReportDraft {
            tasks: vec![task("B1", "P1", json!(0))],
            ..ReportDraft::default()
        };

        match validate_draft(&draft, &catalog()) {
            Err(ReportError::InvalidLine { value }) => assert_eq!(value, "B1"),
            other => panic!("Expected InvalidLine, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_missing_task_line() {
        let draft = ReportDraft {
            tasks: vec![TaskInput {
                line: None,
                row: RawTaskRow::default(),
            }],
            ..ReportDraft::default()
        };

        assert!(matches!(
            validate_draft(&draft, &catalog()),
            Err(ReportError::InvalidLine { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_discount() {
        for bad in [json!(101), json!(-1), json!("150"), json!("ten")] {
            let draft = ReportDraft {
                tasks: vec![task("A3", "P1", bad.clone())],
                ..ReportDraft::default()
            };
            assert!(
                matches!(
                    validate_draft(&draft, &catalog()),
                    Err(ReportError::InvalidDiscount { .. })
                ),
                "discount {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_discount_endpoints_accepted() {
        let draft = ReportDraft {
            tasks: vec![task("A3", "P1", json!(0)), task("A3", "P1", json!(100))],
            ..ReportDraft::default()
        };
        let report = validate_draft(&draft, &catalog()).unwrap();
        assert_eq!(report.tasks[1].discount_percent, 100);
    }

    #[test]
    fn test_fractional_discount_truncates_from_number_or_text() {
        let draft = ReportDraft {
            tasks: vec![task("A3", "P1", json!(30.5)), task("A3", "P1", json!("30.5"))],
            ..ReportDraft::default()
        };
        let report = validate_draft(&draft, &catalog()).unwrap();

        assert_eq!(report.tasks[0].discount_percent, 30);
        assert_eq!(report.tasks[1].discount_percent, 30);
    }

    #[test]
    fn test_unknown_and_blank_codes_are_dropped() {
        let draft = ReportDraft {
            tasks: vec![
                task("A3", "P404", json!(0)),
                task("A3", "", json!(0)),
                task("A4", "P1", json!(0)),
            ],
            ..ReportDraft::default()
        };

        let report = validate_draft(&draft, &catalog()).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].line, Line::A4);
    }

    #[test]
    fn test_rejects_duplicate_line_assignment() {
        let draft = ReportDraft {
            line_employees: vec![
                line_employee(json!(101), "A3", json!(6)),
                line_employee(json!("101"), "A3", json!(2)),
            ],
            ..ReportDraft::default()
        };

        match validate_draft(&draft, &catalog()) {
            Err(ReportError::DuplicateLineAssignment { employee_id, line }) => {
                assert_eq!(employee_id, 101);
                assert_eq!(line, Line::A3);
            }
            other => panic!("Expected DuplicateLineAssignment, got {:?}", other),
        }
    }

    #[test]
    fn test_same_employee_on_both_lines_is_allowed() {
        let draft = ReportDraft {
            line_employees: vec![
                line_employee(json!(101), "A3", json!(6)),
                line_employee(json!(101), "A4", json!(6)),
                line_employee(Value::Null, "A4", json!("")),
                line_employee(json!(0), "A4", json!(-3)),
            ],
            ..ReportDraft::default()
        };

        let report = validate_draft(&draft, &catalog()).unwrap();
        assert_eq!(report.line_employees.len(), 4);
        assert_eq!(report.line_employees[2].employee_id, None);
        assert_eq!(report.line_employees[3].work_time, Decimal::ZERO);
    }

    #[test]
    fn test_rejects_invalid_role() {
        let draft = ReportDraft {
            supports: vec![support("foreman", json!(101))],
            ..ReportDraft::default()
        };

        assert!(matches!(
            validate_draft(&draft, &catalog()),
            Err(ReportError::InvalidRole { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_support_role() {
        let draft = ReportDraft {
            supports: vec![support("repair", json!(101)), support("Repair", Value::Null)],
            ..ReportDraft::default()
        };

        match validate_draft(&draft, &catalog()) {
            Err(ReportError::DuplicateSupportRole { role }) => {
                assert_eq!(role, SupportRole::Repair)
            }
            other => panic!("Expected DuplicateSupportRole, got {:?}", other),
        }
    }
}
