//! Response types for the shift report API.
//!
//! This module defines the response bodies and the mapping from
//! [`ReportError`] to HTTP error responses.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogAvailability;
use crate::error::ReportError;
use crate::models::{CatalogEntry, Line, NormalizedRow};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an error for an unparsable path or query parameter.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new("INVALID_PARAMETER", message)
    }

    /// Creates a report not found error response.
    pub fn report_not_found(site_id: i64, date: impl std::fmt::Display) -> Self {
        Self::new(
            "REPORT_NOT_FOUND",
            format!("No report for site {} on {}", site_id, date),
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response from its parts.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<ReportError> for ApiErrorResponse {
    fn from(error: ReportError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            ReportError::InvalidLine { .. } => (StatusCode::BAD_REQUEST, "INVALID_LINE"),
            ReportError::InvalidRole { .. } => (StatusCode::BAD_REQUEST, "INVALID_ROLE"),
            ReportError::InvalidDiscount { .. } => (StatusCode::BAD_REQUEST, "INVALID_DISCOUNT"),
            ReportError::DuplicateLineAssignment { .. } => {
                (StatusCode::BAD_REQUEST, "DUPLICATE_LINE_ASSIGNMENT")
            }
            ReportError::DuplicateSupportRole { .. } => {
                (StatusCode::BAD_REQUEST, "DUPLICATE_SUPPORT_ROLE")
            }
            ReportError::UnknownSite { .. } => (StatusCode::NOT_FOUND, "SITE_NOT_FOUND"),
            ReportError::ConfigNotFound { .. } | ReportError::ConfigParseError { .. } => {
                return ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                );
            }
            ReportError::Storage { .. } => {
                return ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("STORAGE_ERROR", "The report store is unavailable"),
                );
            }
        };

        let error = if status == StatusCode::BAD_REQUEST {
            ApiError::with_details(code, message, "VALIDATION_ERROR")
        } else {
            ApiError::new(code, message)
        };
        ApiErrorResponse::new(status, error)
    }
}

/// Response body for `POST /rows/normalize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeResponse {
    /// The line the rows were normalized for.
    pub line: Line,
    /// Normalized rows, in input order.
    pub rows: Vec<NormalizedRow>,
}

/// Response body for `GET /catalog/products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    /// Catalog entries sorted by code.
    pub products: Vec<CatalogEntry>,
    /// Counts over the whole catalog.
    pub availability: CatalogAvailability,
}
