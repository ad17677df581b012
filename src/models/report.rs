//! Report models.
//!
//! A [`ReportDraft`] is what the presentation layer submits, a
//! [`ValidatedReport`] is what the store persists, and a [`Report`] is what
//! a load returns, with norm fields re-derived from the current catalog.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    Line, LineEmployeeAssignment, LineEmployeeInput, NormalizedRow, RawTaskRow, SupportInput,
    SupportSlots, TaskRecord,
};

/// A task row of a draft, with its line still unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// Line identifier.
    #[serde(default)]
    pub line: Option<String>,
    /// The entered row.
    #[serde(flatten)]
    pub row: RawTaskRow,
}

/// A candidate report as submitted for saving.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    /// Task rows of both lines.
    #[serde(default)]
    pub tasks: Vec<TaskInput>,
    /// Line-employee assignments.
    #[serde(default)]
    pub line_employees: Vec<LineEmployeeInput>,
    /// Support role assignments, at most one per role.
    #[serde(default)]
    pub supports: Vec<SupportInput>,
}

/// A report that passed validation and can be persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedReport {
    /// Task rows with catalog-resolvable codes.
    pub tasks: Vec<TaskRecord>,
    /// Line-employee assignments.
    pub line_employees: Vec<LineEmployeeAssignment>,
    /// Both support slots.
    pub supports: SupportSlots,
}

/// A report as read back from the store, before catalog enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    /// Report id assigned by the store.
    pub id: i64,
    /// Site of the report.
    pub site_id: i64,
    /// Report date.
    pub report_date: NaiveDate,
    /// The persisted children.
    pub content: ValidatedReport,
}

/// A loaded report with all derived fields filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report id assigned by the store.
    pub id: i64,
    /// Site of the report.
    pub site_id: i64,
    /// Report date.
    pub report_date: NaiveDate,
    /// Normalized task rows, ordered by line.
    pub tasks: Vec<NormalizedRow>,
    /// Line-employee assignments with refreshed names.
    pub line_employees: Vec<LineEmployeeAssignment>,
    /// Both support slots with refreshed names.
    pub supports: SupportSlots,
}

impl Report {
    /// Returns the task rows of one line.
    pub fn tasks_on(&self, line: Line) -> Vec<NormalizedRow> {
        self.tasks.iter().filter(|t| t.line == line).cloned().collect()
    }

    /// Converts the report into an editable working set.
    pub fn working_set(&self) -> WorkingSet {
        let raw_rows = |line: Line| {
            self.tasks
                .iter()
                .filter(|t| t.line == line)
                .map(RawTaskRow::from)
                .collect()
        };

        WorkingSet {
            tasks_a3: raw_rows(Line::A3),
            tasks_a4: raw_rows(Line::A4),
            line_employees: self.line_employees.iter().map(Into::into).collect(),
            supports: self.supports.iter().map(Into::into).collect(),
        }
    }
}

/// The in-memory state of a report being edited.
///
/// Summaries are always computed from a working set, never from a fresh
/// store read, so unsaved edits are reflected immediately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingSet {
    /// Raw task rows entered for line A3.
    #[serde(default)]
    pub tasks_a3: Vec<RawTaskRow>,
    /// Raw task rows entered for line A4.
    #[serde(default)]
    pub tasks_a4: Vec<RawTaskRow>,
    /// Line-employee assignments as entered.
    #[serde(default)]
    pub line_employees: Vec<LineEmployeeInput>,
    /// Support assignments as entered.
    #[serde(default)]
    pub supports: Vec<SupportInput>,
}
