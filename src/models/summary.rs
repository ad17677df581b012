//! Summary table models produced by the aggregator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditStep, Line, SupportRole};

/// One row of the per-product output table.
///
/// Norm totals are rounded to integers only when the row is produced;
/// the grand total is rounded from the unrounded line totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Grouping key, `"<code> - <name>"`.
    pub product: String,
    /// Product code.
    pub product_code: String,
    /// Display name as resolved on the rows.
    pub product_name: String,
    /// Output credited on line A3.
    pub a3: i64,
    /// Output credited on line A4.
    pub a4: i64,
    /// Output credited on both lines.
    pub total: i64,
    /// Raw quantity made on line A3.
    pub made_a3: u64,
    /// Raw quantity made on line A4.
    pub made_a4: u64,
    /// Raw quantity made on both lines.
    pub made_total: u64,
}

/// Head count and hours of one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStaffing {
    /// Number of assignments on the line.
    pub count: u32,
    /// Sum of hours worked on the line.
    pub hours: Decimal,
}

/// The per-line staffing table with grand totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingSummary {
    /// Line A3 staffing.
    pub a3: LineStaffing,
    /// Line A4 staffing.
    pub a4: LineStaffing,
    /// Assignments on both lines.
    pub total_count: u32,
    /// Hours on both lines.
    pub total_hours: Decimal,
}

impl StaffingSummary {
    /// Returns the staffing of one line.
    pub fn line(&self, line: Line) -> &LineStaffing {
        match line {
            Line::A3 => &self.a3,
            Line::A4 => &self.a4,
        }
    }

    /// Returns the per-line hour totals used as norm divisors.
    pub fn line_hours(&self) -> LineHours {
        LineHours {
            a3: self.a3.hours,
            a4: self.a4.hours,
        }
    }
}

/// Total assignment hours per line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineHours {
    /// Hours on line A3.
    pub a3: Decimal,
    /// Hours on line A4.
    pub a4: Decimal,
}

impl LineHours {
    /// Returns the hours of one line.
    pub fn get(&self, line: Line) -> Decimal {
        match line {
            Line::A3 => self.a3,
            Line::A4 => self.a4,
        }
    }
}

/// A filled support slot, listed alongside the staffing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportLine {
    /// Role of the slot.
    pub role: SupportRole,
    /// Display name of the employee.
    pub name: String,
    /// Hours worked.
    pub hours: Decimal,
}

/// Both summary tables of a shift, computed from a working set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Unique id of this computation.
    pub summary_id: Uuid,
    /// Per-product output table, in first-seen order.
    pub products: Vec<ProductSummary>,
    /// Per-line staffing table.
    pub staffing: StaffingSummary,
    /// Filled support slots.
    pub supports: Vec<SupportLine>,
    /// How each product contribution was derived.
    pub audit_steps: Vec<AuditStep>,
}
