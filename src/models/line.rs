//! Production line and support role identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// A physical production line.
///
/// # Example
///
/// ```
/// use shift_report::models::Line;
///
/// let line: Line = " a3 ".parse().unwrap();
/// assert_eq!(line, Line::A3);
/// assert_eq!(line.to_string(), "A3");
/// assert!("B1".parse::<Line>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Line {
    /// Line A3.
    A3,
    /// Line A4.
    A4,
}

impl Line {
    /// Both lines, in display order.
    pub const ALL: [Line; 2] = [Line::A3, Line::A4];

    /// Returns the identifier as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Line::A3 => "A3",
            Line::A4 => "A4",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Line {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A3" => Ok(Line::A3),
            "A4" => Ok(Line::A4),
            _ => Err(ReportError::InvalidLine {
                value: s.to_string(),
            }),
        }
    }
}

/// One of the two fixed supervisory assignments of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportRole {
    /// Shift senior.
    Senior,
    /// Repair technician.
    Repair,
}

impl SupportRole {
    /// Both roles, in display order.
    pub const ALL: [SupportRole; 2] = [SupportRole::Senior, SupportRole::Repair];

    /// Returns the role as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportRole::Senior => "senior",
            SupportRole::Repair => "repair",
        }
    }
}

impl fmt::Display for SupportRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportRole {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "senior" => Ok(SupportRole::Senior),
            "repair" => Ok(SupportRole::Repair),
            _ => Err(ReportError::InvalidRole {
                value: s.to_string(),
            }),
        }
    }
}
