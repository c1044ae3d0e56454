//! Flat record types

use crate::monitoring::TypedValue;
use crate::types::{MetricKind, ValueType};
use serde::{Deserialize, Serialize};

/// strftime format of the `time` column (day/month/year)
pub const TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// One warehouse row per data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    pub time: String,
    pub metric_type: String,
    pub resource_type: String,
    pub metric_kind: MetricKind,
    pub value_type: ValueType,
    pub int_value: i64,
    pub double_value: f64,
    pub string_value: String,
    pub bool_value: bool,
    /// JSON object string of the metric labels
    pub metric_labels: String,
    /// JSON object string of the resource labels
    pub resource_labels: String,
}

impl FlatRecord {
    /// The value slots of this record
    pub fn slots(&self) -> ValueSlots {
        ValueSlots {
            int_value: self.int_value,
            double_value: self.double_value,
            string_value: self.string_value.clone(),
            bool_value: self.bool_value,
        }
    }
}

/// Flat projection of a `TypedValue`
///
/// At most one slot differs from its default; distribution and missing
/// values leave all four at their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSlots {
    pub int_value: i64,
    pub double_value: f64,
    pub string_value: String,
    pub bool_value: bool,
}

impl ValueSlots {
    /// Project a point value onto the slots
    pub fn project(value: Option<&TypedValue>) -> Self {
        match value {
            Some(TypedValue::Int64Value(v)) => Self {
                int_value: *v,
                ..Self::default()
            },
            Some(TypedValue::DoubleValue(v)) => Self {
                double_value: *v,
                ..Self::default()
            },
            Some(TypedValue::StringValue(v)) => Self {
                string_value: v.clone(),
                ..Self::default()
            },
            Some(TypedValue::BoolValue(v)) => Self {
                bool_value: *v,
                ..Self::default()
            },
            Some(TypedValue::DistributionValue(_)) | None => Self::default(),
        }
    }

    /// Number of slots holding a non-default value
    pub fn non_default_count(&self) -> usize {
        [
            self.int_value != 0,
            self.double_value != 0.0,
            !self.string_value.is_empty(),
            self.bool_value,
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }
}
