//! Tests for output module

use super::*;
use crate::types::ExportTimestamp;
use chrono::{TimeZone, Utc};
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;
use test_case::test_case;

fn run() -> ExportTimestamp {
    ExportTimestamp::at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

// ============================================================================
// Staging Tests
// ============================================================================

#[test_case("table/custom.googleapis.com/my_metric", "table_custom.googleapis.com_my_metric" ; "slashes")]
#[test_case("t/a b:c", "t_a_b_c" ; "spaces and colons")]
#[test_case("plain-name_1.x", "plain-name_1.x" ; "already safe")]
fn test_sanitize_prefix(prefix: &str, expected: &str) {
    assert_eq!(sanitize_prefix(prefix), expected);
}

#[test]
fn test_sanitize_prefix_collisions_share_a_staging_file() {
    let stager = LocalStager::new("/tmp/staging");
    assert_eq!(sanitize_prefix("t/a/b"), sanitize_prefix("t/a_b"));
    assert_eq!(stager.staged_path("t/a/b", 1), stager.staged_path("t/a_b", 1));
}

#[test]
fn test_staged_path_is_deterministic() {
    let stager = LocalStager::new("/tmp/staging");
    let path = stager.staged_path("metrics/custom.googleapis.com/m", 3);
    assert_eq!(
        path,
        std::path::PathBuf::from("/tmp/staging/metrics_custom.googleapis.com_m_3.jsonl")
    );
    assert_eq!(path, stager.staged_path("metrics/custom.googleapis.com/m", 3));
}

#[test]
fn test_stage_writes_one_json_line_per_record() {
    let dir = tempdir().unwrap();
    let stager = LocalStager::new(dir.path());
    let records = vec![json!({"a": 1}), json!({"a": 2}), json!({"b": "x\ny"})];

    let path = stager.stage("tbl/metric", 1, &records).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), records.len());
    for (line, record) in lines.iter().zip(&records) {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(&parsed, record);
    }
}

#[test]
fn test_stage_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let stager = LocalStager::new(dir.path());

    stager
        .stage("p", 1, &[json!({"n": 1}), json!({"n": 2})])
        .unwrap();
    let path = stager.stage("p", 1, &[json!({"n": 3})]).unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    assert_eq!(content, "{\"n\":3}\n");
}

#[test]
fn test_stage_empty_page_creates_empty_file() {
    let dir = tempdir().unwrap();
    let stager = LocalStager::new(dir.path().join("nested"));

    let path = stager.stage::<serde_json::Value>("p", 1, &[]).unwrap();
    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(path).unwrap(), "");
}

// ============================================================================
// Upload Tests
// ============================================================================

#[test]
fn test_object_path_layout() {
    assert_eq!(
        object_path("tbl/custom.googleapis.com/my_metric", &run(), 2),
        "tbl/custom.googleapis.com/my_metric/20240301T120000Z/2.jsonl"
    );
}

#[test]
fn test_bucket_uris() {
    let uploader = BucketUploader::new(Arc::new(InMemory::new()), "gs://my-bucket/");
    assert_eq!(uploader.bucket(), "my-bucket");
    assert_eq!(
        uploader.run_glob("tbl/custom.googleapis.com/my_metric", &run()),
        "gs://my-bucket/tbl/custom.googleapis.com/my_metric/20240301T120000Z/*"
    );
    assert_eq!(uploader.uri("/a/b.jsonl"), "gs://my-bucket/a/b.jsonl");
}

#[tokio::test]
async fn test_upload_puts_object_and_removes_local_file() {
    let dir = tempdir().unwrap();
    let stager = LocalStager::new(dir.path());
    let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
    let uploader = BucketUploader::new(store.clone(), "bucket");

    let local = stager
        .stage("tbl/m", 1, &[json!({"v": 1}), json!({"v": 2})])
        .unwrap();
    let key = uploader.upload("tbl/m", &run(), 1, &local).await.unwrap();

    assert_eq!(key, "tbl/m/20240301T120000Z/1.jsonl");
    assert!(!local.exists());

    let stored = store
        .get(&ObjectPath::from(key.as_str()))
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    assert_eq!(&stored[..], b"{\"v\":1}\n{\"v\":2}\n");
}

#[tokio::test]
async fn test_upload_missing_local_file_fails() {
    let dir = tempdir().unwrap();
    let uploader = BucketUploader::new(Arc::new(InMemory::new()), "bucket");

    let err = uploader
        .upload("tbl/m", &run(), 1, &dir.path().join("missing.jsonl"))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::error::Error::Io(_)));
}
