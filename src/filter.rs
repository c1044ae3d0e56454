//! Metric filters
//!
//! A filter selects the time series of one metric type. Its quoted metric
//! type doubles as the object path segment all pages of an export land under.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Greedy match between the first and last double quote
static QUOTED_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(.*)""#).expect("valid quoted subject regex"));

/// A metric-type selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFilter {
    expression: String,
}

impl MetricFilter {
    /// Filter selecting exactly `metric_type`
    pub fn for_metric_type(metric_type: &str) -> Self {
        Self {
            expression: format!("metric.type = \"{}\"", metric_type.trim()),
        }
    }

    /// Filter from a raw expression
    pub fn from_expression(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    /// The filter expression sent to the monitoring API
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The quoted metric type inside the expression
    ///
    /// Fails with `InvalidFilter` when the expression has no quoted part.
    pub fn subject(&self) -> Result<&str> {
        QUOTED_SUBJECT
            .captures(&self.expression)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|subject| !subject.is_empty())
            .ok_or_else(|| Error::invalid_filter(&self.expression))
    }
}

impl fmt::Display for MetricFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
