//! Tests for the record module

use super::*;
use crate::monitoring::{Metric, MonitoredResource, Point, PointInterval, TimeSeries, TypedValue};
use crate::types::{LabelMap, MetricKind, ValueType};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

fn labels(pairs: &[(&str, &str)]) -> LabelMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn series(value_type: ValueType, values: Vec<TypedValue>) -> TimeSeries {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
    TimeSeries {
        metric: Metric {
            metric_type: "custom.googleapis.com/my_metric".to_string(),
            labels: labels(&[("env", "prod"), ("team", "core")]),
        },
        resource: MonitoredResource {
            resource_type: "gce_instance".to_string(),
            labels: labels(&[("zone", "europe-west1-b")]),
        },
        metric_kind: MetricKind::Gauge,
        value_type,
        points: values.into_iter().map(|v| Point::at(at, v)).collect(),
        unit: String::new(),
    }
}

#[test]
fn test_flatten_double_point() {
    let records = flatten(&[series(
        ValueType::Double,
        vec![TypedValue::DoubleValue(3.5)],
    )])
    .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.time, "01/03/2024 09:05:07");
    assert_eq!(record.metric_type, "custom.googleapis.com/my_metric");
    assert_eq!(record.resource_type, "gce_instance");
    assert_eq!(record.metric_kind, MetricKind::Gauge);
    assert_eq!(record.value_type, ValueType::Double);
    assert_eq!(record.double_value, 3.5);
    assert_eq!(record.int_value, 0);
    assert_eq!(record.string_value, "");
    assert!(!record.bool_value);
}

#[test]
fn test_exactly_one_slot_per_value_type() {
    let cases = vec![
        (ValueType::Int64, TypedValue::Int64Value(4)),
        (ValueType::Double, TypedValue::DoubleValue(-1.25)),
        (ValueType::String, TypedValue::StringValue("up".to_string())),
        (ValueType::Bool, TypedValue::BoolValue(true)),
    ];

    for (value_type, value) in cases {
        let record = flatten(&[series(value_type, vec![value.clone()])])
            .unwrap()
            .remove(0);
        let slots = record.slots();
        assert_eq!(slots.non_default_count(), 1, "{value_type}");

        match value {
            TypedValue::Int64Value(v) => assert_eq!(slots.int_value, v),
            TypedValue::DoubleValue(v) => assert_eq!(slots.double_value, v),
            TypedValue::StringValue(v) => assert_eq!(slots.string_value, v),
            TypedValue::BoolValue(v) => assert_eq!(slots.bool_value, v),
            TypedValue::DistributionValue(_) => unreachable!(),
        }
    }
}

#[test]
fn test_distribution_and_missing_values_keep_defaults() {
    let mut ts = series(
        ValueType::Distribution,
        vec![TypedValue::DistributionValue(json!({"count": "3"}))],
    );
    ts.points.push(Point {
        interval: PointInterval {
            start_time: None,
            end_time: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        },
        value: None,
    });

    let records = flatten(&[ts]).unwrap();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.slots(), ValueSlots::default());
        assert_eq!(record.value_type, ValueType::Distribution);
    }
    // Missing start time falls back to the end time
    assert_eq!(records[1].time, "01/03/2024 10:00:00");
}

#[test]
fn test_flatten_preserves_order() {
    let first = series(
        ValueType::Int64,
        vec![TypedValue::Int64Value(1), TypedValue::Int64Value(2)],
    );
    let second = series(ValueType::Int64, vec![TypedValue::Int64Value(3)]);

    let values: Vec<i64> = flatten(&[first, second])
        .unwrap()
        .iter()
        .map(|r| r.int_value)
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_flatten_empty_page() {
    assert!(flatten(&[]).unwrap().is_empty());
    assert!(flatten(&[series(ValueType::Double, vec![])]).unwrap().is_empty());
}

#[test]
fn test_labels_round_trip() {
    let records = flatten(&[series(ValueType::Bool, vec![TypedValue::BoolValue(false)])]).unwrap();
    let record = &records[0];

    let metric: LabelMap = serde_json::from_str(&record.metric_labels).unwrap();
    let resource: LabelMap = serde_json::from_str(&record.resource_labels).unwrap();
    assert_eq!(metric, labels(&[("env", "prod"), ("team", "core")]));
    assert_eq!(resource, labels(&[("zone", "europe-west1-b")]));
}

#[test]
fn test_empty_labels_serialize_as_empty_object() {
    assert_eq!(serialize_labels(&LabelMap::new()).unwrap(), "{}");
}

#[test]
fn test_record_json_shape() {
    let record = flatten(&[series(ValueType::Int64, vec![TypedValue::Int64Value(4)])])
        .unwrap()
        .remove(0);
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(
        value,
        json!({
            "time": "01/03/2024 09:05:07",
            "metric_type": "custom.googleapis.com/my_metric",
            "resource_type": "gce_instance",
            "metric_kind": "GAUGE",
            "value_type": "INT64",
            "int_value": 4,
            "double_value": 0.0,
            "string_value": "",
            "bool_value": false,
            "metric_labels": "{\"env\":\"prod\",\"team\":\"core\"}",
            "resource_labels": "{\"zone\":\"europe-west1-b\"}"
        })
    );
}
