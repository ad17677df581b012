//! Performance benchmarks for the shift report engine.
//!
//! Covers the pure summary path over working sets of increasing size and a
//! full `POST /summary` round trip through the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use serde_json::json;

use shift_report::api::{AppState, create_router};
use shift_report::calculation::summarize_shift;
use shift_report::catalog::CatalogIndex;
use shift_report::config::CalculationSettings;
use shift_report::models::{CatalogEntry, LineEmployeeInput, RawTaskRow, WorkingSet};
use shift_report::report::ReportService;
use shift_report::storage::{ReportStore, SqliteStore};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const PRODUCT_COUNT: usize = 50;

fn catalog_entries() -> Vec<CatalogEntry> {
    (0..PRODUCT_COUNT)
        .map(|i| CatalogEntry {
            code: format!("P{:03}", i),
            name: format!("Product {}", i),
            norm_a3: (i % 5 != 0).then(|| Decimal::from(60 + i as i64)),
            norm_a4: (i % 7 != 0).then(|| Decimal::from(80 + i as i64)),
        })
        .collect()
}

/// Creates a working set with `rows` task rows per line.
fn create_working_set(rows: usize) -> WorkingSet {
    let task = |i: usize| RawTaskRow {
        product_code: Some(format!("P{:03}", i % PRODUCT_COUNT)),
        qty_made: json!(i % 40),
        discount_percent: json!(i % 30),
        count_by_norm: json!(i % 3 == 0),
    };

    WorkingSet {
        tasks_a3: (0..rows).map(task).collect(),
        tasks_a4: (0..rows).map(|i| task(i + 1)).collect(),
        line_employees: (0..12)
            .map(|i| LineEmployeeInput {
                employee_id: json!(100 + i),
                name: None,
                work_time: json!(if i % 4 == 0 { "11.5" } else { "8" }),
                line: Some(if i % 2 == 0 { "A3" } else { "A4" }.to_string()),
            })
            .collect(),
        supports: vec![],
    }
}

/// Benchmark: summary computation for growing working sets.
fn bench_summarize_shift(c: &mut Criterion) {
    let catalog = CatalogIndex::new(catalog_entries(), vec![]);
    let settings = CalculationSettings::default();

    let mut group = c.benchmark_group("summarize_shift");
    for rows in [10_usize, 100, 1_000] {
        let working_set = create_working_set(rows);
        group.throughput(Throughput::Elements((rows * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &working_set, |b, ws| {
            b.iter(|| black_box(summarize_shift(ws, &catalog, &settings)))
        });
    }
    group.finish();
}

/// Benchmark: POST /summary through the router with a 100-row working set.
fn bench_summary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert_products(&catalog_entries()).unwrap();
    let service = ReportService::new(Arc::new(store), CalculationSettings::default());
    let router = create_router(AppState::new(service));
    let body = serde_json::to_string(&create_working_set(100)).unwrap();

    c.bench_function("summary_endpoint_100_rows", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/summary")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_summarize_shift, bench_summary_endpoint);
criterion_main!(benches);
