//! Error types for the shift report engine.
//!
//! Only validation, configuration and storage can fail. Normalization and
//! aggregation default malformed input instead of raising errors, and a
//! product code or employee id missing from the catalog is never an error.

use thiserror::Error;

use crate::models::{Line, SupportRole};

/// The main error type for the shift report engine.
///
/// # Example
///
/// ```
/// use shift_report::error::ReportError;
///
/// let error = ReportError::InvalidLine {
///     value: "B7".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid line 'B7': expected A3 or A4");
/// assert!(error.is_validation());
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A line identifier outside {A3, A4}.
    #[error("Invalid line '{value}': expected A3 or A4")]
    InvalidLine {
        /// The rejected value.
        value: String,
    },

    /// A support role outside {senior, repair}.
    #[error("Invalid support role '{value}': expected senior or repair")]
    InvalidRole {
        /// The rejected value.
        value: String,
    },

    /// A discount that is not a whole number in 0..=100.
    #[error("Invalid discount '{value}': must be between 0 and 100")]
    InvalidDiscount {
        /// The rejected value, as entered.
        value: String,
    },

    /// The same employee was assigned to the same line twice.
    #[error("Employee {employee_id} is assigned to line {line} more than once")]
    DuplicateLineAssignment {
        /// The employee id.
        employee_id: i64,
        /// The line of both assignments.
        line: Line,
    },

    /// A support role slot was supplied more than once.
    #[error("Support role '{role}' is assigned more than once")]
    DuplicateSupportRole {
        /// The duplicated role.
        role: SupportRole,
    },

    /// A report was saved for a site that is not in the site list.
    #[error("Unknown site {site_id}")]
    UnknownSite {
        /// The requested site id.
        site_id: i64,
    },

    /// Any persistence-layer fault.
    #[error("Storage failure: {message}")]
    Storage {
        /// A description of the underlying fault.
        message: String,
    },
}

impl ReportError {
    /// Returns true for errors raised by the validation layer.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidLine { .. }
                | ReportError::InvalidRole { .. }
                | ReportError::InvalidDiscount { .. }
                | ReportError::DuplicateLineAssignment { .. }
                | ReportError::DuplicateSupportRole { .. }
        )
    }
}

impl From<rusqlite::Error> for ReportError {
    fn from(err: rusqlite::Error) -> Self {
        ReportError::Storage {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
