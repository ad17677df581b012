//! Core data models for the shift report engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod audit;
mod catalog;
mod line;
mod report;
mod summary;
mod task;

pub use assignment::{
    LineEmployeeAssignment, LineEmployeeInput, SupportAssignment, SupportInput, SupportSlots,
};
pub use audit::AuditStep;
pub use catalog::{CatalogEntry, Employee, Site};
pub use line::{Line, SupportRole};
pub use report::{Report, ReportDraft, StoredReport, TaskInput, ValidatedReport, WorkingSet};
pub use summary::{
    LineHours, LineStaffing, ProductSummary, ShiftSummary, StaffingSummary, SupportLine,
};
pub use task::{NormalizedRow, RawTaskRow, TaskRecord};
