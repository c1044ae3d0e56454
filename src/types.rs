//! Common types used throughout the exporter
//!
//! This module contains shared type definitions, type aliases,
//! and the monitoring API enumerations used across multiple modules.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Label collection attached to a metric or a monitored resource
pub type LabelMap = BTreeMap<String, String>;

// ============================================================================
// Metric Kind
// ============================================================================

/// How the points of a time series relate to time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    #[default]
    MetricKindUnspecified,
    Gauge,
    Delta,
    Cumulative,
}

impl MetricKind {
    /// API name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MetricKindUnspecified => "METRIC_KIND_UNSPECIFIED",
            Self::Gauge => "GAUGE",
            Self::Delta => "DELTA",
            Self::Cumulative => "CUMULATIVE",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Value Type
// ============================================================================

/// Declared type of the values in a time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    #[default]
    ValueTypeUnspecified,
    Bool,
    Int64,
    Double,
    String,
    Distribution,
    Money,
}

impl ValueType {
    /// API name of the value type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValueTypeUnspecified => "VALUE_TYPE_UNSPECIFIED",
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Distribution => "DISTRIBUTION",
            Self::Money => "MONEY",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Time Series View
// ============================================================================

/// Which parts of a time series the list call returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeSeriesView {
    /// Headers and points
    #[default]
    Full,
    /// Headers only, no points
    Headers,
}

impl TimeSeriesView {
    /// Pick the view from a "full view" flag
    pub fn from_full(full: bool) -> Self {
        if full {
            Self::Full
        } else {
            Self::Headers
        }
    }

    /// API name of the view
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "FULL",
            Self::Headers => "HEADERS",
        }
    }
}

// ============================================================================
// Aligner
// ============================================================================

/// Per-series alignment function applied before points are returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Aligner {
    AlignNone,
    AlignDelta,
    AlignRate,
    AlignInterpolate,
    AlignNextOlder,
    AlignMin,
    AlignMax,
    #[default]
    AlignMean,
    AlignCount,
    AlignSum,
    AlignStddev,
    AlignCountTrue,
    AlignCountFalse,
    AlignFractionTrue,
    #[serde(rename = "ALIGN_PERCENTILE_99")]
    AlignPercentile99,
    #[serde(rename = "ALIGN_PERCENTILE_95")]
    AlignPercentile95,
    #[serde(rename = "ALIGN_PERCENTILE_50")]
    AlignPercentile50,
    #[serde(rename = "ALIGN_PERCENTILE_05")]
    AlignPercentile05,
    AlignPercentChange,
}

impl Aligner {
    /// Every aligner the monitoring API accepts
    pub const ALL: [Aligner; 19] = [
        Self::AlignNone,
        Self::AlignDelta,
        Self::AlignRate,
        Self::AlignInterpolate,
        Self::AlignNextOlder,
        Self::AlignMin,
        Self::AlignMax,
        Self::AlignMean,
        Self::AlignCount,
        Self::AlignSum,
        Self::AlignStddev,
        Self::AlignCountTrue,
        Self::AlignCountFalse,
        Self::AlignFractionTrue,
        Self::AlignPercentile99,
        Self::AlignPercentile95,
        Self::AlignPercentile50,
        Self::AlignPercentile05,
        Self::AlignPercentChange,
    ];

    /// API name of the aligner
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlignNone => "ALIGN_NONE",
            Self::AlignDelta => "ALIGN_DELTA",
            Self::AlignRate => "ALIGN_RATE",
            Self::AlignInterpolate => "ALIGN_INTERPOLATE",
            Self::AlignNextOlder => "ALIGN_NEXT_OLDER",
            Self::AlignMin => "ALIGN_MIN",
            Self::AlignMax => "ALIGN_MAX",
            Self::AlignMean => "ALIGN_MEAN",
            Self::AlignCount => "ALIGN_COUNT",
            Self::AlignSum => "ALIGN_SUM",
            Self::AlignStddev => "ALIGN_STDDEV",
            Self::AlignCountTrue => "ALIGN_COUNT_TRUE",
            Self::AlignCountFalse => "ALIGN_COUNT_FALSE",
            Self::AlignFractionTrue => "ALIGN_FRACTION_TRUE",
            Self::AlignPercentile99 => "ALIGN_PERCENTILE_99",
            Self::AlignPercentile95 => "ALIGN_PERCENTILE_95",
            Self::AlignPercentile50 => "ALIGN_PERCENTILE_50",
            Self::AlignPercentile05 => "ALIGN_PERCENTILE_05",
            Self::AlignPercentChange => "ALIGN_PERCENT_CHANGE",
        }
    }
}

impl fmt::Display for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aligner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        let wanted = if wanted.starts_with("ALIGN_") {
            wanted
        } else {
            format!("ALIGN_{wanted}")
        };
        Self::ALL
            .into_iter()
            .find(|aligner| aligner.as_str() == wanted)
            .ok_or_else(|| Error::invalid_value("aligner", format!("unknown aligner '{s}'")))
    }
}

// ============================================================================
// Export Timestamp
// ============================================================================

/// Identifies one export run; captured once per process
///
/// Rendered into object paths so pages of different runs never collide and
/// one glob covers every page of a run.
///
/// The segment is `YYYYMMDDTHHMMSSZ`. Older exports used
/// `%Y-%m-%d %H:%M:%S`, so their bucket paths do not match this layout and
/// globs built here never pick them up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExportTimestamp(DateTime<Utc>);

impl ExportTimestamp {
    /// strftime format of the path segment
    pub const FORMAT: &'static str = "%Y%m%dT%H%M%SZ";

    /// Capture the current time
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a given instant
    pub fn at(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// The captured instant
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Object path segment for this run
    pub fn path_segment(&self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }
}

impl fmt::Display for ExportTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
