//! Tests for engine module

use super::*;
use crate::error::Error;
use crate::monitoring::{Metric, MonitoredResource, Point, TimeSeries, TimeSeriesPage, TypedValue};
use crate::types::{Aligner, MetricKind, ValueType};
use crate::warehouse::LoadSummary;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Stubs
// ============================================================================

/// Hands out queued pages and records every request it sees
#[derive(Default)]
struct StubFetcher {
    pages: Mutex<VecDeque<Result<TimeSeriesPage>>>,
    requests: Mutex<Vec<ListTimeSeriesRequest>>,
}

impl StubFetcher {
    fn with_pages(pages: Vec<Result<TimeSeriesPage>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ListTimeSeriesRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricsFetcher for StubFetcher {
    async fn fetch(&self, request: &ListTimeSeriesRequest) -> Result<TimeSeriesPage> {
        self.requests.lock().unwrap().push(request.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(TimeSeriesPage::default()))
    }
}

/// Records load requests and reports a fixed table shape
#[derive(Default)]
struct StubLoader {
    requests: Mutex<Vec<LoadRequest>>,
}

impl StubLoader {
    fn requests(&self) -> Vec<LoadRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WarehouseLoader for StubLoader {
    async fn load(&self, request: &LoadRequest) -> Result<LoadSummary> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(LoadSummary {
            table_id: request.table_id(),
            num_rows: 2,
            num_columns: 12,
        })
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn config(staging_dir: &std::path::Path) -> ExportConfig {
    ExportConfig {
        project_id: "my-project".to_string(),
        seconds: 3600,
        dataset: "metrics".to_string(),
        table: "table".to_string(),
        page_size: 500,
        bucket: "bucket".to_string(),
        filters: vec!["custom.googleapis.com/my_metric".to_string()],
        aligner: Aligner::AlignMean,
        full_view: true,
        staging_dir: staging_dir.to_path_buf(),
        location: None,
        poll_interval: Duration::from_millis(1),
        timeout: None,
    }
}

fn run_timestamp() -> ExportTimestamp {
    ExportTimestamp::at(Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap())
}

fn series(value_type: ValueType, value: TypedValue) -> TimeSeries {
    TimeSeries {
        metric: Metric {
            metric_type: "custom.googleapis.com/my_metric".to_string(),
            labels: [("env".to_string(), "prod".to_string())].into(),
        },
        resource: MonitoredResource {
            resource_type: "global".to_string(),
            labels: Default::default(),
        },
        metric_kind: MetricKind::Gauge,
        value_type,
        points: vec![Point::at(
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            value,
        )],
        unit: String::new(),
    }
}

fn page(token: &str) -> TimeSeriesPage {
    TimeSeriesPage::new(
        vec![series(ValueType::Double, TypedValue::DoubleValue(1.0))],
        token,
    )
}

struct Harness {
    engine: ExportEngine,
    fetcher: Arc<StubFetcher>,
    loader: Arc<StubLoader>,
    store: Arc<dyn ObjectStore>,
    staging: tempfile::TempDir,
}

fn harness(pages: Vec<Result<TimeSeriesPage>>) -> Harness {
    let staging = tempfile::tempdir().unwrap();
    let fetcher = StubFetcher::with_pages(pages);
    let loader = Arc::new(StubLoader::default());
    let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());

    let engine = ExportEngine::new(
        config(staging.path()),
        fetcher.clone(),
        BucketUploader::new(store.clone(), "bucket"),
        loader.clone(),
        run_timestamp(),
    );

    Harness {
        engine,
        fetcher,
        loader,
        store,
        staging,
    }
}

async fn object_keys(store: &Arc<dyn ObjectStore>) -> Vec<String> {
    let mut keys: Vec<String> = store
        .list(None)
        .map_ok(|meta| meta.location.to_string())
        .try_collect()
        .await
        .unwrap();
    keys.sort();
    keys
}

fn staged_files(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

// ============================================================================
// Request building
// ============================================================================

#[test]
fn test_build_request_uses_config() {
    let h = harness(vec![]);
    let filter = MetricFilter::for_metric_type("custom.googleapis.com/my_metric");
    let interval = TimeInterval::ending_at(
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        &Lookback::seconds(3600),
    );

    let request = h.engine.build_request(&filter, interval);
    assert_eq!(request.name, "projects/my-project");
    assert_eq!(request.filter, "metric.type = \"custom.googleapis.com/my_metric\"");
    assert_eq!(request.page_size, 500);
    assert_eq!(request.aggregation.alignment_period_seconds, 3600);
    assert_eq!(request.aggregation.per_series_aligner, Aligner::AlignMean);
    assert!(request.page_token.is_none());
}

#[test]
fn test_file_prefix() {
    let h = harness(vec![]);
    let filter = MetricFilter::for_metric_type("custom.googleapis.com/my_metric");
    assert_eq!(
        h.engine.file_prefix(&filter).unwrap(),
        "table/custom.googleapis.com/my_metric"
    );
}

// ============================================================================
// Export flow
// ============================================================================

#[tokio::test]
async fn test_single_page_end_to_end() {
    let h = harness(vec![Ok(TimeSeriesPage::new(
        vec![
            series(ValueType::Double, TypedValue::DoubleValue(3.5)),
            series(ValueType::Int64, TypedValue::Int64Value(4)),
        ],
        "",
    ))]);
    let filter = MetricFilter::for_metric_type("custom.googleapis.com/my_metric");

    let summary = h.engine.export_filter(&filter).await.unwrap();

    assert_eq!(summary.subject, "custom.googleapis.com/my_metric");
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.records, 2);
    assert_eq!(
        summary.objects,
        vec!["table/custom.googleapis.com/my_metric/20240301T090507Z/1.jsonl".to_string()]
    );
    assert_eq!(
        summary.source_uri,
        "gs://bucket/table/custom.googleapis.com/my_metric/20240301T090507Z/*"
    );
    assert_eq!(summary.load.table_id, "my-project.metrics.table");

    // Uploaded object carries one JSON line per point
    let key = object_store::path::Path::from(summary.objects[0].as_str());
    let bytes = h.store.get(&key).await.unwrap().bytes().await.unwrap();
    let lines: Vec<serde_json::Value> = std::str::from_utf8(&bytes)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["double_value"], 3.5);
    assert_eq!(lines[0]["time"], "01/03/2024 08:00:00");
    assert_eq!(lines[1]["int_value"], 4);
    assert_eq!(lines[1]["value_type"], "INT64");

    let loads = h.loader.requests();
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].source_uri, summary.source_uri);
    assert_eq!(loads[0].dataset, "metrics");

    assert_eq!(staged_files(&h.staging), 0);
}

#[tokio::test]
async fn test_follows_tokens_for_n_pages() {
    let h = harness(vec![Ok(page("t1")), Ok(page("t2")), Ok(page(""))]);
    let filter = MetricFilter::for_metric_type("custom.googleapis.com/my_metric");

    let summary = h.engine.export_filter(&filter).await.unwrap();
    assert_eq!(summary.pages, 3);
    assert_eq!(summary.records, 3);

    let tokens: Vec<Option<String>> = h
        .fetcher
        .requests()
        .into_iter()
        .map(|r| r.page_token)
        .collect();
    assert_eq!(
        tokens,
        vec![None, Some("t1".to_string()), Some("t2".to_string())]
    );

    let prefix = "table/custom.googleapis.com/my_metric/20240301T090507Z";
    assert_eq!(
        object_keys(&h.store).await,
        vec![
            format!("{prefix}/1.jsonl"),
            format!("{prefix}/2.jsonl"),
            format!("{prefix}/3.jsonl"),
        ]
    );
    assert_eq!(h.loader.requests().len(), 1);
    assert_eq!(staged_files(&h.staging), 0);
}

#[tokio::test]
async fn test_empty_page_is_still_staged() {
    let h = harness(vec![Ok(TimeSeriesPage::default())]);
    let filter = MetricFilter::for_metric_type("custom.googleapis.com/my_metric");

    let summary = h.engine.export_filter(&filter).await.unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.records, 0);
    assert_eq!(object_keys(&h.store).await.len(), 1);
    assert_eq!(h.loader.requests().len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_skips_load() {
    let h = harness(vec![
        Ok(page("t1")),
        Err(Error::http_status(503, "unavailable")),
    ]);
    let filter = MetricFilter::for_metric_type("custom.googleapis.com/my_metric");

    let err = h.engine.export_filter(&filter).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));

    // Page 1 stays in the bucket, nothing is loaded
    assert_eq!(object_keys(&h.store).await.len(), 1);
    assert!(h.loader.requests().is_empty());
}

#[tokio::test]
async fn test_invalid_filter_makes_no_calls() {
    let h = harness(vec![Ok(page(""))]);
    let filter = MetricFilter::from_expression("metric.type = starts_with(custom)");

    let err = h.engine.export_filter(&filter).await.unwrap_err();
    assert!(matches!(err, Error::InvalidFilter { .. }));
    assert!(h.fetcher.requests().is_empty());
    assert!(object_keys(&h.store).await.is_empty());
    assert!(h.loader.requests().is_empty());
}

// ============================================================================
// Run
// ============================================================================

#[tokio::test]
async fn test_run_shares_timestamp_across_filters() {
    let h = harness(vec![Ok(page("")), Ok(page(""))]);
    let filters = vec![
        MetricFilter::for_metric_type("custom.googleapis.com/a"),
        MetricFilter::for_metric_type("custom.googleapis.com/b"),
    ];

    let summary = h.engine.run(&filters).await.unwrap();
    assert_eq!(summary.exports.len(), 2);
    assert_eq!(summary.total_pages(), 2);
    assert_eq!(summary.total_records(), 2);

    let loads = h.loader.requests();
    assert_eq!(
        loads.iter().map(|l| l.source_uri.as_str()).collect::<Vec<_>>(),
        vec![
            "gs://bucket/table/custom.googleapis.com/a/20240301T090507Z/*",
            "gs://bucket/table/custom.googleapis.com/b/20240301T090507Z/*",
        ]
    );

    let requests = h.fetcher.requests();
    assert_eq!(requests[0].filter, "metric.type = \"custom.googleapis.com/a\"");
    assert_eq!(requests[1].filter, "metric.type = \"custom.googleapis.com/b\"");
}

#[tokio::test]
async fn test_run_stops_at_first_failure() {
    let h = harness(vec![Err(Error::http_status(500, "boom")), Ok(page(""))]);
    let filters = vec![
        MetricFilter::for_metric_type("custom.googleapis.com/a"),
        MetricFilter::for_metric_type("custom.googleapis.com/b"),
    ];

    assert!(h.engine.run(&filters).await.is_err());
    assert_eq!(h.fetcher.requests().len(), 1);
    assert!(h.loader.requests().is_empty());
}
