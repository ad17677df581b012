//! Per-line staffing summary.

use tracing::debug;

use crate::models::{Line, LineEmployeeInput, LineStaffing, StaffingSummary};

use super::coercion::coerce_hours;

/// Counts assignments and sums hours per line.
///
/// Assignments whose line is missing or not a known line are left out of
/// every total. Missing or invalid hours count as zero; unfilled rows still
/// count toward the head count. Hour sums saturate instead of overflowing.
///
/// # Example
///
/// ```
/// use shift_report::calculation::summarize_staffing;
/// use shift_report::models::LineEmployeeInput;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// let rows = vec![
///     LineEmployeeInput { line: Some("A3".into()), work_time: json!(8), ..Default::default() },
///     LineEmployeeInput { line: Some("A3".into()), work_time: json!("8"), ..Default::default() },
///     LineEmployeeInput { line: Some("B7".into()), work_time: json!(12), ..Default::default() },
/// ];
///
/// let staffing = summarize_staffing(&rows);
/// assert_eq!(staffing.a3.count, 2);
/// assert_eq!(staffing.total_hours, Decimal::new(16, 0));
/// ```
pub fn summarize_staffing(assignments: &[LineEmployeeInput]) -> StaffingSummary {
    let mut a3 = LineStaffing::default();
    let mut a4 = LineStaffing::default();

    for assignment in assignments {
        let line = match assignment.line.as_deref().map(str::parse::<Line>) {
            Some(Ok(line)) => line,
            _ => {
                debug!(line = ?assignment.line, "Skipping assignment without a known line");
                continue;
            }
        };

        let staffing = match line {
            Line::A3 => &mut a3,
            Line::A4 => &mut a4,
        };
        staffing.count = staffing.count.saturating_add(1);
        staffing.hours = staffing.hours.saturating_add(coerce_hours(&assignment.work_time));
    }

    StaffingSummary {
        a3,
        a4,
        total_count: a3.count.saturating_add(a4.count),
        total_hours: a3.hours.saturating_add(a4.hours),
    }
}
