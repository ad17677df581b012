//! Integration tests for the shift report HTTP API.
//!
//! Each test builds a router over a fresh in-memory store seeded from
//! `config/default/catalog.yaml`. Covered:
//! - Catalog listings (sites, products per line, employees)
//! - Row normalization
//! - Shift summaries over unsaved working sets
//! - Report save, load and delete
//! - Validation and request errors

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use shift_report::api::{AppState, create_router};
use shift_report::config::ConfigLoader;
use shift_report::logging;
use shift_report::report::ReportService;
use shift_report::storage::{SqliteStore, seed_catalog};

// =============================================================================
// Test Helpers
// =============================================================================

const REPORT_URI: &str = "/reports/1/2024-03-15";

fn create_router_for_test() -> Router {
    logging::init_test();
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let seed = ConfigLoader::load_catalog_seed("./config/default/catalog.yaml")
        .expect("Failed to load catalog seed");

    let store = SqliteStore::open_in_memory().expect("Failed to open store");
    seed_catalog(&store, &seed).expect("Failed to seed catalog");

    let service = ReportService::new(Arc::new(store), *config.calculation());
    create_router(AppState::new(service))
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn task(line: &str, code: &str, qty: i64, discount: Value, count_by_norm: bool) -> Value {
    json!({
        "line": line,
        "sap_code": code,
        "qty_made": qty,
        "discount_percent": discount,
        "count_by_norm": count_by_norm
    })
}

fn line_employee(employee_id: i64, line: &str, hours: Value) -> Value {
    json!({
        "employee_id": employee_id,
        "work_time": hours,
        "line": line
    })
}

fn sample_draft() -> Value {
    json!({
        "tasks": [
            task("A3", "P1", 7, json!(30), false),
            task("A4", "P1", 50, json!(""), true),
            task("A4", "P404", 3, json!(0), true)
        ],
        "line_employees": [
            line_employee(101, "A3", json!(8)),
            line_employee(102, "A3", json!("8")),
            line_employee(103, "A4", json!(11.5))
        ],
        "supports": [
            { "role": "senior", "employee_id": 104, "work_time": 12 },
            { "role": "repair", "employee_id": null, "work_time": "" }
        ]
    })
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_list_sites() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/sites", None).await;

    assert_eq!(status, StatusCode::OK);
    let sites = body.as_array().unwrap();
    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0]["id"], 1);
    assert_eq!(sites[0]["name"], "North Plant");
}

#[tokio::test]
async fn test_list_products_for_line() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/catalog/products?line=A4", None).await;

    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["P1", "P3", "P4"]);

    // P0 has no norms and is never stored
    assert_eq!(body["availability"]["total"], 4);
    assert_eq!(body["availability"]["on_a3"], 3);
    assert_eq!(body["availability"]["on_a4"], 3);
}

#[tokio::test]
async fn test_list_products_rejects_unknown_line() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/catalog/products?line=B2", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_LINE");
}

#[tokio::test]
async fn test_list_employees_sorted_by_name() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/catalog/employees", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 5);
    assert_eq!(names[0], "Ivanova A.");
    assert!(names.windows(2).all(|w| w[0] <= w[1]));
}

// =============================================================================
// Normalization
// =============================================================================

#[tokio::test]
async fn test_normalize_rows() {
    let router = create_router_for_test();
    let request = json!({
        "line": "A3",
        "rows": [
            { "sap_code": "P1", "qty_made": "7", "discount_percent": 30, "count_by_norm": false },
            { "sap_code": "P3", "qty_made": 2 },
            { "sap_code": "P404" },
            {}
        ]
    });
    let (status, body) = send(&router, "POST", "/rows/normalize", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["line"], "A3");
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0]["product_name"], "Bracket");
    assert_eq!(rows[0]["norm_with_discount"], 70);
    assert_eq!(rows[0]["qty_made"], 7);

    assert_eq!(rows[1]["product_name"], "Cover plate (not produced on A3)");
    assert_eq!(rows[1]["norm_with_discount"], 0);
    assert_eq!(rows[1]["producible"], false);
    assert_eq!(rows[1]["count_by_norm"], true);

    assert_eq!(rows[2]["product_name"], "");
    assert_eq!(rows[3]["product_code"], "");
}

#[tokio::test]
async fn test_normalize_rejects_unknown_line() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/rows/normalize",
        Some(json!({ "line": "A5", "rows": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_LINE");
}

#[tokio::test]
async fn test_normalize_missing_line_field() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "POST", "/rows/normalize", Some(json!({ "rows": [] }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Summaries
// =============================================================================

#[tokio::test]
async fn test_summary_scenario_both_lines() {
    let router = create_router_for_test();
    let working_set = json!({
        "tasks_a3": [
            { "sap_code": "P1", "qty_made": 7, "discount_percent": 30, "count_by_norm": false }
        ],
        "tasks_a4": [
            { "sap_code": "P1", "qty_made": 50, "discount_percent": 40, "count_by_norm": true }
        ],
        "line_employees": [
            line_employee(101, "A3", json!(8)),
            line_employee(102, "A3", json!(8)),
            line_employee(103, "A4", json!(12))
        ],
        "supports": [
            { "role": "senior", "employee_id": 104, "work_time": 12 }
        ]
    });
    let (status, body) = send(&router, "POST", "/summary", Some(working_set)).await;

    assert_eq!(status, StatusCode::OK);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["product"], "P1 - Bracket");
    assert_eq!(products[0]["a3"], 93);
    assert_eq!(products[0]["a4"], 50);
    assert_eq!(products[0]["total"], 143);
    assert_eq!(products[0]["made_total"], 57);

    assert_eq!(body["staffing"]["a3"]["count"], 2);
    assert_eq!(body["staffing"]["a3"]["hours"], "16");
    assert_eq!(body["staffing"]["total_count"], 3);
    assert_eq!(body["supports"][0]["name"], "Orlova M.");
    assert_eq!(body["audit_steps"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_summary_zero_hours_line_contributes_nothing() {
    let router = create_router_for_test();
    let working_set = json!({
        "tasks_a4": [
            { "sap_code": "P4", "qty_made": 5, "count_by_norm": false }
        ],
        "line_employees": [ line_employee(101, "A3", json!(8)) ]
    });
    let (status, body) = send(&router, "POST", "/summary", Some(working_set)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["a4"], 0);
    assert_eq!(body["products"][0]["made_a4"], 5);
}

#[tokio::test]
async fn test_summary_ignores_unknown_lines() {
    let router = create_router_for_test();
    let working_set = json!({
        "line_employees": [
            line_employee(101, "A3", json!(8)),
            line_employee(102, "Z9", json!(8))
        ]
    });
    let (status, body) = send(&router, "POST", "/summary", Some(working_set)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staffing"]["total_count"], 1);
    assert_eq!(body["staffing"]["total_hours"], "8");
}

#[tokio::test]
async fn test_summary_caps_oversized_hours() {
    let router = create_router_for_test();
    let working_set = json!({
        "tasks_a3": [
            { "sap_code": "P1", "qty_made": 1, "discount_percent": 0, "count_by_norm": false }
        ],
        "line_employees": [
            line_employee(101, "A3", json!(1e28)),
            line_employee(102, "A4", json!("50000000000000000000000000000")),
            line_employee(103, "A4", json!("50000000000000000000000000000"))
        ]
    });
    let (status, body) = send(&router, "POST", "/summary", Some(working_set)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["staffing"]["a3"]["hours"], "24");
    assert_eq!(body["staffing"]["a4"]["hours"], "48");
    assert_eq!(body["products"][0]["a3"], 200);
}

#[tokio::test]
async fn test_summary_malformed_json() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/summary")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_save_load_delete_lifecycle() {
    let router = create_router_for_test();

    let (status, saved) = send(&router, "PUT", REPORT_URI, Some(sample_draft())).await;
    assert_eq!(status, StatusCode::OK);
    // The P404 row is not in the catalog and is dropped
    assert_eq!(saved["tasks"].as_array().unwrap().len(), 2);
    assert_eq!(saved["tasks"][0]["line"], "A3");
    assert_eq!(saved["tasks"][0]["norm_with_discount"], 70);
    assert_eq!(saved["tasks"][1]["discount_percent"], 0);
    assert_eq!(saved["line_employees"][1]["name"], "Petrov S.");
    assert_eq!(saved["supports"]["senior"]["name"], "Orlova M.");
    assert_eq!(saved["supports"]["repair"]["employee_id"], Value::Null);

    let (status, loaded) = send(&router, "GET", REPORT_URI, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, saved);

    let (status, body) = send(&router, "DELETE", REPORT_URI, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&router, "GET", REPORT_URI, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "REPORT_NOT_FOUND");

    let (status, _) = send(&router, "DELETE", REPORT_URI, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_repeated_save_is_idempotent() {
    let router = create_router_for_test();

    let (_, first) = send(&router, "PUT", REPORT_URI, Some(sample_draft())).await;
    let (status, second) = send(&router, "PUT", REPORT_URI, Some(sample_draft())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_save_with_empty_tasks_wipes_tasks() {
    let router = create_router_for_test();
    send(&router, "PUT", REPORT_URI, Some(sample_draft())).await;

    let mut draft = sample_draft();
    draft["tasks"] = json!([]);
    let (status, saved) = send(&router, "PUT", REPORT_URI, Some(draft)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(saved["tasks"].as_array().unwrap().is_empty());
    assert_eq!(saved["line_employees"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_save_rejects_out_of_range_discount() {
    let router = create_router_for_test();
    let mut draft = sample_draft();
    draft["tasks"][0]["discount_percent"] = json!(150);

    let (status, body) = send(&router, "PUT", REPORT_URI, Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DISCOUNT");
    assert_eq!(body["details"], "VALIDATION_ERROR");

    let (status, _) = send(&router, "GET", REPORT_URI, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_rejects_duplicate_assignments() {
    let router = create_router_for_test();

    let mut draft = sample_draft();
    draft["line_employees"] = json!([
        line_employee(101, "A3", json!(4)),
        line_employee(101, "A3", json!(4))
    ]);
    let (status, body) = send(&router, "PUT", REPORT_URI, Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_LINE_ASSIGNMENT");

    let mut draft = sample_draft();
    draft["supports"] = json!([
        { "role": "senior", "employee_id": 104 },
        { "role": "senior", "employee_id": 105 }
    ]);
    let (status, body) = send(&router, "PUT", REPORT_URI, Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_SUPPORT_ROLE");
}

#[tokio::test]
async fn test_save_rejects_invalid_role() {
    let router = create_router_for_test();
    let mut draft = sample_draft();
    draft["supports"] = json!([{ "role": "foreman", "employee_id": 104 }]);

    let (status, body) = send(&router, "PUT", REPORT_URI, Some(draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ROLE");
}

#[tokio::test]
async fn test_save_for_unknown_site() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "PUT", "/reports/99/2024-03-15", Some(sample_draft())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SITE_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_report_date() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/reports/1/15-03-2024", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_reports_are_keyed_by_site_and_date() {
    let router = create_router_for_test();
    send(&router, "PUT", REPORT_URI, Some(sample_draft())).await;

    let (status, _) = send(&router, "GET", "/reports/2/2024-03-15", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&router, "GET", "/reports/1/2024-03-16", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
