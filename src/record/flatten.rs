//! Time series to flat record projection

use super::types::{FlatRecord, ValueSlots, TIME_FORMAT};
use crate::error::Result;
use crate::monitoring::{Point, TimeSeries};
use crate::types::LabelMap;
use tracing::debug;

/// Flatten a page of time series, preserving series and point order
pub fn flatten(time_series: &[TimeSeries]) -> Result<Vec<FlatRecord>> {
    debug!("Parsing data into data points");

    let mut records = Vec::with_capacity(time_series.iter().map(|ts| ts.points.len()).sum());
    for series in time_series {
        let metric_labels = serialize_labels(&series.metric.labels)?;
        let resource_labels = serialize_labels(&series.resource.labels)?;

        for point in &series.points {
            records.push(flatten_point(
                series,
                point,
                metric_labels.clone(),
                resource_labels.clone(),
            ));
        }
    }

    debug!(records = records.len(), "Parsing completed");
    Ok(records)
}

/// Build the record of one point of `series`
pub fn flatten_point(
    series: &TimeSeries,
    point: &Point,
    metric_labels: String,
    resource_labels: String,
) -> FlatRecord {
    let ValueSlots {
        int_value,
        double_value,
        string_value,
        bool_value,
    } = ValueSlots::project(point.value.as_ref());

    FlatRecord {
        time: point.timestamp().format(TIME_FORMAT).to_string(),
        metric_type: series.metric.metric_type.clone(),
        resource_type: series.resource.resource_type.clone(),
        metric_kind: series.metric_kind,
        value_type: series.value_type,
        int_value,
        double_value,
        string_value,
        bool_value,
        metric_labels,
        resource_labels,
    }
}

/// Serialize a label map to a JSON object string
pub fn serialize_labels(labels: &LabelMap) -> Result<String> {
    Ok(serde_json::to_string(labels)?)
}
