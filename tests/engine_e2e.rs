// logscope - tests/engine_e2e.rs
//
// End-to-end tests for the analytics pipeline: a batch is produced
// (mock generator or wire-format JSON on disk), ingested wholesale,
// and queried for summary metrics, hourly buckets, filtered views,
// and exports — no mocks of our own components, real serde round
// trips, real tempfile I/O.

use chrono::{TimeZone, Utc};
use logscope::app::source::BatchSource;
use logscope::core::engine::{EngineOptions, LogAnalyticsEngine, SuccessPolicy};
use logscope::core::export::{export_csv, export_json};
use logscope::core::filter::{FilterCriteria, HourRange, StatusClassFilter};
use logscope::core::mock::{generate_batch, MockConfig};
use logscope::core::model::{LogRecord, MetricsSummary};
use std::io::Write;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

fn seeded_batch(count: usize, seed: u64) -> Vec<LogRecord> {
    let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
    generate_batch(
        &MockConfig {
            count,
            span_hours: 24,
            seed: Some(seed),
        },
        now,
    )
}

fn engine_with(batch: Vec<LogRecord>) -> LogAnalyticsEngine {
    let mut engine = LogAnalyticsEngine::new();
    engine.ingest(batch);
    engine
}

// =============================================================================
// Aggregate invariants over generated data
// =============================================================================

/// totalRequests always equals the batch size, and failedRequests
/// equals the count of records with success == false.
#[test]
fn e2e_summary_counts_match_the_batch() {
    let batch = seeded_batch(300, 42);
    let expected_failed = batch.iter().filter(|r| !r.success).count();

    let engine = engine_with(batch);
    let summary = engine.summary();

    assert_eq!(summary.total_requests, 300);
    assert_eq!(summary.failed_requests, expected_failed);
    assert!(summary.success_rate_percent >= 0.0 && summary.success_rate_percent <= 100.0);
    assert!(summary.peak_latency_ms >= summary.average_latency_ms.round() as u64);
}

/// The 24 buckets always partition the full batch.
#[test]
fn e2e_buckets_partition_every_record() {
    for seed in [1, 7, 99] {
        let engine = engine_with(seeded_batch(250, seed));
        let buckets = engine.hourly_buckets();

        assert_eq!(buckets.len(), 24);
        let total: usize = buckets.iter().map(|b| b.total_count).sum();
        assert_eq!(total, engine.len());

        for bucket in &buckets {
            assert_eq!(bucket.total_count, bucket.success_count + bucket.error_count);
        }
    }
}

/// Empty engine: all-zero summary, 24 empty buckets, empty views.
#[test]
fn e2e_empty_engine_degrades_to_zeros() {
    let engine = LogAnalyticsEngine::new();

    assert_eq!(engine.summary(), MetricsSummary::empty());

    let buckets = engine.hourly_buckets();
    assert_eq!(buckets.len(), 24);
    assert!(buckets.iter().all(|b| b.total_count == 0));

    assert!(engine.filter(&FilterCriteria::default()).is_empty());
}

/// Identity filtering returns the full batch in ingestion order.
#[test]
fn e2e_identity_filter_is_order_preserving() {
    let batch = seeded_batch(100, 5);
    let expected_ids: Vec<String> = batch.iter().map(|r| r.id.clone()).collect();

    let engine = engine_with(batch);
    let view = engine.filter(&FilterCriteria::default());

    let ids: Vec<String> = view.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, expected_ids);
}

/// Filtering by method partitions the batch exactly.
#[test]
fn e2e_method_filter_partitions_the_batch() {
    let engine = engine_with(seeded_batch(300, 11));

    let gets = engine.filter(&FilterCriteria {
        method: Some("GET".to_string()),
        ..Default::default()
    });
    assert!(gets.iter().all(|r| r.method == "GET"));

    let non_get_count = engine
        .records()
        .iter()
        .filter(|r| r.method != "GET")
        .count();
    assert_eq!(gets.len() + non_get_count, engine.len());
}

/// Status-class views cover the batch between them.
#[test]
fn e2e_status_class_views_are_complementary() {
    let engine = engine_with(seeded_batch(300, 23));

    let success = engine.filter(&FilterCriteria {
        status_class: StatusClassFilter::Success,
        ..Default::default()
    });
    let error = engine.filter(&FilterCriteria {
        status_class: StatusClassFilter::Error,
        ..Default::default()
    });

    assert!(success.iter().all(|r| r.status_code < 400));
    assert!(error.iter().all(|r| r.status_code >= 400));
    assert_eq!(success.len() + error.len(), engine.len());
}

/// An inverted hour window is a valid query that matches nothing.
#[test]
fn e2e_inverted_hour_range_yields_empty_view() {
    let engine = engine_with(seeded_batch(200, 31));
    let view = engine.filter(&FilterCriteria {
        hour_range: Some(HourRange::new(5, 3).unwrap()),
        ..Default::default()
    });
    assert!(view.is_empty());
}

/// Repeated queries on unchanged state are bit-identical.
#[test]
fn e2e_queries_are_stable_across_calls() {
    let engine = engine_with(seeded_batch(150, 77));

    assert_eq!(engine.summary(), engine.summary());
    assert_eq!(engine.hourly_buckets(), engine.hourly_buckets());

    let criteria = FilterCriteria {
        search_text: Some("orders".to_string()),
        ..Default::default()
    };
    let a: Vec<&str> = engine.filter(&criteria).iter().map(|r| r.id.as_str()).collect();
    let b: Vec<&str> = engine.filter(&criteria).iter().map(|r| r.id.as_str()).collect();
    assert_eq!(a, b);
}

// =============================================================================
// Success-policy behaviour on a deliberately inconsistent feed
// =============================================================================

#[test]
fn e2e_success_policies_diverge_on_inconsistent_records() {
    let mut batch = seeded_batch(50, 13);
    // Corrupt the feed: every record claims success regardless of status.
    for record in &mut batch {
        record.success = true;
    }
    let errors_by_status = batch.iter().filter(|r| r.status_code >= 400).count();
    assert!(errors_by_status > 0, "seed produced no error statuses");

    let mut trusting = LogAnalyticsEngine::new();
    trusting.ingest(batch.clone());
    assert_eq!(trusting.summary().failed_requests, 0);

    let mut deriving = LogAnalyticsEngine::with_options(
        EngineOptions::default().with_success_policy(SuccessPolicy::DeriveFromStatus),
    );
    deriving.ingest(batch);
    assert_eq!(deriving.summary().failed_requests, errors_by_status);
}

// =============================================================================
// Wire format round trip through the filesystem
// =============================================================================

/// A batch serialised to disk in wire naming is ingested identically
/// by the file source.
#[test]
fn e2e_wire_json_file_round_trip() {
    let batch = seeded_batch(40, 8);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    serde_json::to_writer(&mut file, &batch).unwrap();
    file.flush().unwrap();

    let source = BatchSource::JsonFile(file.path().to_path_buf());
    let loaded = source.load(Utc::now()).unwrap();
    assert_eq!(loaded, batch);

    // And the engine produces the same analytics for both.
    let from_memory = engine_with(batch).summary();
    let from_disk = engine_with(loaded).summary();
    assert_eq!(from_memory, from_disk);
}

/// Hand-written backend payload with extended fields exercises the
/// documented wire contract.
#[test]
fn e2e_ingests_backend_shaped_payload() {
    let payload = r#"[
        {
            "id": "req-0001",
            "timestamp": "2026-03-14T10:05:00Z",
            "ip": "203.0.113.7",
            "method": "GET",
            "endpoint": "/api/v1/orders",
            "status": 200,
            "latency": 100,
            "proxyLatency": 12,
            "success": true,
            "userAgent": "curl/8.4.0",
            "size": 2048,
            "location": "eu-west-1",
            "applicationName": "checkout-web",
            "applicationId": "app-001",
            "userName": "alice.ng",
            "userId": "u-1001",
            "apiName": "orders-api"
        },
        {
            "id": "req-0002",
            "timestamp": "2026-03-14T10:40:00Z",
            "ip": "203.0.113.9",
            "method": "POST",
            "endpoint": "/api/v1/payments",
            "status": 500,
            "latency": 400,
            "success": false,
            "userAgent": "okhttp/4.12.0",
            "size": 128,
            "location": "us-east-1"
        },
        {
            "id": "req-0003",
            "timestamp": "2026-03-14T11:10:00Z",
            "ip": "203.0.113.7",
            "method": "GET",
            "endpoint": "/api/v1/orders/lookup",
            "status": 404,
            "latency": 50,
            "success": false,
            "userAgent": "curl/8.4.0",
            "size": 64,
            "location": "eu-west-1"
        }
    ]"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(payload.as_bytes()).unwrap();

    let source = BatchSource::JsonFile(file.path().to_path_buf());
    let engine = engine_with(source.load(Utc::now()).unwrap());

    // The worked scenario from the analytics contract.
    let summary = engine.summary();
    assert_eq!(summary.total_requests, 3);
    assert_eq!(summary.failed_requests, 2);
    assert_eq!(summary.unique_client_count, 2);
    assert_eq!(summary.peak_latency_ms, 400);
    assert!((summary.average_latency_ms - 183.333_333).abs() < 0.001);
    assert!((summary.success_rate_percent - 33.333_333).abs() < 0.001);

    let buckets = engine.hourly_buckets();
    assert_eq!(buckets[10].total_count, 2);
    assert_eq!(buckets[10].success_count, 1);
    assert_eq!(buckets[10].error_count, 1);
    assert_eq!(buckets[11].total_count, 1);
    assert_eq!(buckets[11].error_count, 1);

    // Text search reaches the extended application field.
    let view = engine.filter(&FilterCriteria {
        search_text: Some("checkout".to_string()),
        ..Default::default()
    });
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "req-0001");
}

// =============================================================================
// Export pipeline
// =============================================================================

#[test]
fn e2e_filtered_view_exports_to_csv_and_json() {
    let engine = engine_with(seeded_batch(120, 55));
    let criteria = FilterCriteria {
        status_class: StatusClassFilter::Error,
        ..Default::default()
    };
    let view = engine.filter(&criteria);
    assert!(!view.is_empty(), "seed produced no error records");

    let mut csv_buf = Vec::new();
    let written = export_csv(&view, &mut csv_buf, &PathBuf::from("errors.csv")).unwrap();
    assert_eq!(written, view.len());
    let csv_text = String::from_utf8(csv_buf).unwrap();
    // Header plus one line per record.
    assert_eq!(csv_text.lines().count(), view.len() + 1);

    let mut json_buf = Vec::new();
    export_json(&view, &mut json_buf, &PathBuf::from("errors.json")).unwrap();
    let reparsed: Vec<LogRecord> = serde_json::from_slice(&json_buf).unwrap();
    assert_eq!(reparsed.len(), view.len());
    assert!(reparsed.iter().all(|r| r.status_code >= 400));
}
