//! Export configuration
//!
//! Settings come from an optional YAML file and from the command line
//! (flags or their environment variables). Command-line values win. The
//! merged settings are resolved into an `ExportConfig`, checking required
//! fields and applying defaults.

use crate::error::{Error, Result};
use crate::filter::MetricFilter;
use crate::types::Aligner;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default lookback window in seconds
pub const DEFAULT_SECONDS: u64 = 3600;

/// Default page size of the list call
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Default delay between load job polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

// ============================================================================
// Partial settings (file or command line)
// ============================================================================

/// Settings as read from one source; every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Project holding the metrics (also runs the load job)
    #[serde(default)]
    pub project: Option<String>,

    /// Lookback window in seconds
    #[serde(default)]
    pub seconds: Option<u64>,

    /// Destination dataset
    #[serde(default)]
    pub dataset: Option<String>,

    /// Destination table
    #[serde(default)]
    pub table: Option<String>,

    /// Page size of the list call
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Staging bucket
    #[serde(default)]
    pub bucket: Option<String>,

    /// Metric types to export
    #[serde(default)]
    pub filters: Option<Vec<String>>,

    /// Per-series aligner
    #[serde(default)]
    pub aligner: Option<Aligner>,

    /// Ask for headers only instead of full series
    #[serde(default)]
    pub headers_only: Option<bool>,

    /// Directory for staged page files
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,

    /// Load job location
    #[serde(default)]
    pub location: Option<String>,

    /// Delay between load job polls
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// HTTP request timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Parse settings from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Overlay `overrides` on top of these settings
    #[must_use]
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            project: overrides.project.or(self.project),
            seconds: overrides.seconds.or(self.seconds),
            dataset: overrides.dataset.or(self.dataset),
            table: overrides.table.or(self.table),
            page_size: overrides.page_size.or(self.page_size),
            bucket: overrides.bucket.or(self.bucket),
            filters: overrides.filters.or(self.filters),
            aligner: overrides.aligner.or(self.aligner),
            headers_only: overrides.headers_only.or(self.headers_only),
            staging_dir: overrides.staging_dir.or(self.staging_dir),
            location: overrides.location.or(self.location),
            poll_interval_ms: overrides.poll_interval_ms.or(self.poll_interval_ms),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Check required fields, apply defaults and validate values
    pub fn resolve(self) -> Result<ExportConfig> {
        let config = ExportConfig {
            project_id: required("project", self.project)?,
            seconds: self.seconds.unwrap_or(DEFAULT_SECONDS),
            dataset: required("dataset", self.dataset)?,
            table: required("table", self.table)?,
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            bucket: normalize_bucket(&required("bucket", self.bucket)?),
            filters: self
                .filters
                .ok_or_else(|| Error::missing_field("filters"))?
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
            aligner: self.aligner.unwrap_or_default(),
            full_view: !self.headers_only.unwrap_or(false),
            staging_dir: self.staging_dir.unwrap_or_else(std::env::temp_dir),
            location: self.location.filter(|l| !l.trim().is_empty()),
            poll_interval: Duration::from_millis(
                self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            timeout: self.timeout_secs.map(Duration::from_secs),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Split a comma-separated metric type list
pub fn split_filter_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_field(field))
}

fn normalize_bucket(bucket: &str) -> String {
    bucket
        .strip_prefix("gs://")
        .unwrap_or(bucket)
        .trim_end_matches('/')
        .to_string()
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// Fully resolved export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub project_id: String,
    pub seconds: u64,
    pub dataset: String,
    pub table: String,
    pub page_size: u32,
    /// Bucket name without scheme
    pub bucket: String,
    /// Metric types, one export each
    pub filters: Vec<String>,
    pub aligner: Aligner,
    pub full_view: bool,
    pub staging_dir: PathBuf,
    pub location: Option<String>,
    pub poll_interval: Duration,
    pub timeout: Option<Duration>,
}

impl ExportConfig {
    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        if self.seconds == 0 {
            return Err(Error::invalid_value("seconds", "must be greater than 0"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.filters.is_empty() {
            return Err(Error::invalid_value("filters", "no metric types given"));
        }
        if self.bucket.is_empty() || self.bucket.contains('/') {
            return Err(Error::invalid_value(
                "bucket",
                format!("'{}' is not a bucket name", self.bucket),
            ));
        }
        Ok(())
    }

    /// One filter per configured metric type
    pub fn metric_filters(&self) -> Vec<MetricFilter> {
        self.filters
            .iter()
            .map(|f| MetricFilter::for_metric_type(f))
            .collect()
    }
}
