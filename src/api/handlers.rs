//! HTTP request handlers for the shift report API.
//!
//! Store-backed work runs on the blocking thread pool; normalization and
//! summaries are computed against a catalog snapshot read per request.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ReportError, ReportResult};
use crate::models::{Line, ReportDraft, WorkingSet};

use super::request::{NormalizeRequest, ProductsQuery};
use super::response::{ApiError, ApiErrorResponse, NormalizeResponse, ProductsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sites", get(list_sites_handler))
        .route("/catalog/products", get(list_products_handler))
        .route("/catalog/employees", get(list_employees_handler))
        .route("/rows/normalize", post(normalize_handler))
        .route("/summary", post(summary_handler))
        .route(
            "/reports/:site_id/:date",
            get(load_report_handler)
                .put(save_report_handler)
                .delete(delete_report_handler),
        )
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: ReportError) -> Response {
    if matches!(error, ReportError::Storage { .. }) {
        warn!(correlation_id = %correlation_id, error = %error, "Storage failure");
    } else {
        warn!(correlation_id = %correlation_id, error = %error, "Request rejected");
    }
    ApiErrorResponse::from(error).into_response()
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn parameter_rejection_response(correlation_id: Uuid, message: String) -> Response {
    warn!(correlation_id = %correlation_id, error = %message, "Invalid request parameter");
    json_response(StatusCode::BAD_REQUEST, ApiError::invalid_parameter(message))
}

/// Runs store-backed work off the async runtime.
async fn run_blocking<T, F>(work: F) -> ReportResult<T>
where
    F: FnOnce() -> ReportResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ReportError::Storage {
            message: format!("blocking task failed: {}", e),
        })?
}

/// Handler for GET /sites.
async fn list_sites_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let service = state.service().clone();

    match run_blocking(move || service.sites()).await {
        Ok(sites) => {
            info!(correlation_id = %correlation_id, count = sites.len(), "Listed sites");
            json_response(StatusCode::OK, sites)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /catalog/products.
///
/// With `?line=A3` or `?line=A4`, only products with a norm on that line
/// are listed. The availability counts always cover the whole catalog.
async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ProductsQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return parameter_rejection_response(correlation_id, rejection.body_text());
        }
    };
    let line = match query.line.as_deref().map(str::parse::<Line>).transpose() {
        Ok(line) => line,
        Err(err) => return error_response(correlation_id, err),
    };

    let service = state.service().clone();
    match run_blocking(move || service.catalog()).await {
        Ok(catalog) => {
            let body = ProductsResponse {
                products: catalog.products(line).into_iter().cloned().collect(),
                availability: catalog.availability(),
            };
            info!(
                correlation_id = %correlation_id,
                line = ?line,
                count = body.products.len(),
                "Listed catalog products"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /catalog/employees.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let service = state.service().clone();

    match run_blocking(move || service.employees()).await {
        Ok(employees) => {
            info!(correlation_id = %correlation_id, count = employees.len(), "Listed employees");
            json_response(StatusCode::OK, employees)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /rows/normalize.
///
/// Fills the derived fields of entered rows for one line. Unknown codes and
/// malformed numbers never fail; only an unknown line does.
async fn normalize_handler(
    State(state): State<AppState>,
    payload: Result<Json<NormalizeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };
    let line: Line = match request.line.parse() {
        Ok(line) => line,
        Err(err) => return error_response(correlation_id, err),
    };

    let service = state.service().clone();
    let rows = request.rows;
    match run_blocking(move || service.normalize(line, &rows)).await {
        Ok(rows) => {
            info!(
                correlation_id = %correlation_id,
                line = %line,
                rows = rows.len(),
                "Rows normalized"
            );
            json_response(StatusCode::OK, NormalizeResponse { line, rows })
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /summary.
///
/// Summarizes the posted working set, which may contain unsaved edits.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkingSet>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let working_set = match payload {
        Ok(Json(working_set)) => working_set,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let service = state.service().clone();
    let start_time = Instant::now();
    match run_blocking(move || service.summarize(&working_set)).await {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                summary_id = %summary.summary_id,
                products = summary.products.len(),
                total_hours = %summary.staffing.total_hours,
                duration_us = start_time.elapsed().as_micros(),
                "Summary computed"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /reports/:site_id/:date.
async fn load_report_handler(
    State(state): State<AppState>,
    path: Result<Path<(i64, NaiveDate)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (site_id, date) = match path {
        Ok(Path(key)) => key,
        Err(rejection) => return parameter_rejection_response(correlation_id, rejection.body_text()),
    };

    let service = state.service().clone();
    match run_blocking(move || service.load(site_id, date)).await {
        Ok(Some(report)) => {
            info!(
                correlation_id = %correlation_id,
                report_id = report.id,
                site_id,
                date = %date,
                "Report loaded"
            );
            json_response(StatusCode::OK, report)
        }
        Ok(None) => {
            info!(correlation_id = %correlation_id, site_id, date = %date, "Report not found");
            json_response(StatusCode::NOT_FOUND, ApiError::report_not_found(site_id, date))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /reports/:site_id/:date.
///
/// Validates the draft, replaces the stored report and returns it as read
/// back from the store.
async fn save_report_handler(
    State(state): State<AppState>,
    path: Result<Path<(i64, NaiveDate)>, PathRejection>,
    payload: Result<Json<ReportDraft>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (site_id, date) = match path {
        Ok(Path(key)) => key,
        Err(rejection) => return parameter_rejection_response(correlation_id, rejection.body_text()),
    };
    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let service = state.service().clone();
    match run_blocking(move || service.save(site_id, date, &draft)).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                report_id = report.id,
                site_id,
                date = %date,
                tasks = report.tasks.len(),
                "Report saved"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /reports/:site_id/:date.
async fn delete_report_handler(
    State(state): State<AppState>,
    path: Result<Path<(i64, NaiveDate)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (site_id, date) = match path {
        Ok(Path(key)) => key,
        Err(rejection) => return parameter_rejection_response(correlation_id, rejection.body_text()),
    };

    let service = state.service().clone();
    match run_blocking(move || service.delete(site_id, date)).await {
        Ok(true) => {
            info!(correlation_id = %correlation_id, site_id, date = %date, "Report deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => json_response(StatusCode::NOT_FOUND, ApiError::report_not_found(site_id, date)),
        Err(err) => error_response(correlation_id, err),
    }
}
