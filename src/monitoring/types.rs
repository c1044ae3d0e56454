//! Wire types of the time series list response

use crate::types::{JsonValue, LabelMap, MetricKind, ValueType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One page returned by a list call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPage {
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
    /// Empty when this is the last page
    #[serde(default)]
    pub next_page_token: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execution_errors: Vec<JsonValue>,
}

impl TimeSeriesPage {
    /// Page holding `time_series` followed by `next_page_token`
    pub fn new(time_series: Vec<TimeSeries>, next_page_token: impl Into<String>) -> Self {
        Self {
            time_series,
            next_page_token: next_page_token.into(),
            execution_errors: Vec::new(),
        }
    }

    /// Number of points across every series of the page
    pub fn point_count(&self) -> usize {
        self.time_series.iter().map(|ts| ts.points.len()).sum()
    }
}

/// A metric stream of one monitored resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub resource: MonitoredResource,
    #[serde(default)]
    pub metric_kind: MetricKind,
    #[serde(default)]
    pub value_type: ValueType,
    /// Newest point first, as returned by the backend
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,
}

/// Metric type plus its labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(rename = "type", default)]
    pub metric_type: String,
    #[serde(default)]
    pub labels: LabelMap,
}

/// Resource type plus its labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredResource {
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub labels: LabelMap,
}

/// A single data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub interval: PointInterval,
    #[serde(default)]
    pub value: Option<TypedValue>,
}

impl Point {
    /// Point at `at` (start and end equal) holding `value`
    pub fn at(at: DateTime<Utc>, value: TypedValue) -> Self {
        Self {
            interval: PointInterval {
                start_time: Some(at),
                end_time: at,
            },
            value: Some(value),
        }
    }

    /// Timestamp the point is reported under
    ///
    /// The start time, or the end time for gauge points that omit it.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.interval.start_time.unwrap_or(self.interval.end_time)
    }
}

/// Time span a point covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointInterval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
}

/// The value carried by a point; exactly one variant per point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypedValue {
    BoolValue(bool),
    #[serde(deserialize_with = "de_int64")]
    Int64Value(i64),
    #[serde(deserialize_with = "de_double")]
    DoubleValue(f64),
    StringValue(String),
    DistributionValue(JsonValue),
}

/// int64 arrives as a decimal string in JSON, but accept bare numbers too
fn de_int64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(i64),
        Str(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Doubles may be encoded as "NaN", "Infinity" or "-Infinity"
fn de_double<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(f64),
        Str(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Str(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => other.parse().map_err(serde::de::Error::custom),
        },
    }
}
