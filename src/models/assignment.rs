//! Employee assignment models: line employees and support roles.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Line, SupportRole};

/// A line-employee assignment as entered.
///
/// The line is kept as free text so that summaries over an unsaved working
/// set can skip unknown lines instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineEmployeeInput {
    /// Employee id; blank, null or 0 means unfilled.
    #[serde(default)]
    pub employee_id: Value,
    /// Display name as last shown.
    #[serde(default, alias = "fio")]
    pub name: Option<String>,
    /// Hours worked.
    #[serde(default)]
    pub work_time: Value,
    /// Line identifier.
    #[serde(default)]
    pub line: Option<String>,
}

/// A validated line-employee assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEmployeeAssignment {
    /// Employee id, `None` for an unfilled row.
    pub employee_id: Option<i64>,
    /// Display name, refreshed from the employee catalog on read.
    pub name: String,
    /// Hours worked.
    pub work_time: Decimal,
    /// Line worked.
    pub line: Line,
}

impl From<&LineEmployeeAssignment> for LineEmployeeInput {
    fn from(assignment: &LineEmployeeAssignment) -> Self {
        LineEmployeeInput {
            employee_id: assignment.employee_id.map(Value::from).unwrap_or(Value::Null),
            name: Some(assignment.name.clone()),
            work_time: Value::String(assignment.work_time.to_string()),
            line: Some(assignment.line.to_string()),
        }
    }
}

/// A support role assignment as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportInput {
    /// Role identifier.
    #[serde(default)]
    pub role: Option<String>,
    /// Employee id; blank, null or 0 means unfilled.
    #[serde(default)]
    pub employee_id: Value,
    /// Display name as last shown.
    #[serde(default, alias = "fio")]
    pub name: Option<String>,
    /// Hours worked.
    #[serde(default)]
    pub work_time: Value,
}

/// A validated support role assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportAssignment {
    /// The role of this slot.
    pub role: SupportRole,
    /// Employee id, `None` while the slot is unfilled.
    pub employee_id: Option<i64>,
    /// Display name.
    pub name: String,
    /// Hours worked.
    pub work_time: Decimal,
}

impl From<&SupportAssignment> for SupportInput {
    fn from(assignment: &SupportAssignment) -> Self {
        SupportInput {
            role: Some(assignment.role.to_string()),
            employee_id: assignment.employee_id.map(Value::from).unwrap_or(Value::Null),
            name: Some(assignment.name.clone()),
            work_time: Value::String(assignment.work_time.to_string()),
        }
    }
}

impl SupportAssignment {
    /// Creates an unfilled slot for a role.
    pub fn unfilled(role: SupportRole) -> Self {
        Self {
            role,
            employee_id: None,
            name: String::new(),
            work_time: Decimal::ZERO,
        }
    }

    /// Returns true if an employee occupies the slot.
    pub fn is_filled(&self) -> bool {
        self.employee_id.is_some()
    }
}

/// Exactly one support slot per role.
///
/// # Example
///
/// ```
/// use shift_report::models::{SupportRole, SupportSlots};
///
/// let slots = SupportSlots::default();
/// assert!(!slots.get(SupportRole::Senior).is_filled());
/// assert_eq!(slots.iter().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportSlots {
    /// The shift senior slot.
    pub senior: SupportAssignment,
    /// The repair technician slot.
    pub repair: SupportAssignment,
}

impl SupportSlots {
    /// Returns the slot for a role.
    pub fn get(&self, role: SupportRole) -> &SupportAssignment {
        match role {
            SupportRole::Senior => &self.senior,
            SupportRole::Repair => &self.repair,
        }
    }

    /// Returns a mutable reference to the slot for a role.
    pub fn get_mut(&mut self, role: SupportRole) -> &mut SupportAssignment {
        match role {
            SupportRole::Senior => &mut self.senior,
            SupportRole::Repair => &mut self.repair,
        }
    }

    /// Iterates over both slots, senior first.
    pub fn iter(&self) -> impl Iterator<Item = &SupportAssignment> {
        [&self.senior, &self.repair].into_iter()
    }
}

impl Default for SupportSlots {
    fn default() -> Self {
        Self {
            senior: SupportAssignment::unfilled(SupportRole::Senior),
            repair: SupportAssignment::unfilled(SupportRole::Repair),
        }
    }
}
