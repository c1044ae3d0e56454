//! List request construction

use super::interval::TimeInterval;
use crate::types::{Aligner, TimeSeriesView};
use chrono::SecondsFormat;

/// Per-series aggregation applied by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregation {
    /// Alignment bucket width in seconds
    pub alignment_period_seconds: u64,
    /// Function aligning the raw samples of one series
    pub per_series_aligner: Aligner,
}

/// Description of one `projects.timeSeries.list` call
///
/// Built once per filter; only `page_token` changes while paginating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTimeSeriesRequest {
    /// Scope, `projects/{project_id}`
    pub name: String,
    /// Filter expression, e.g. `metric.type = "..."`
    pub filter: String,
    pub interval: TimeInterval,
    pub aggregation: Aggregation,
    pub view: TimeSeriesView,
    pub page_size: u32,
    /// Continuation token from the previous page
    pub page_token: Option<String>,
}

impl ListTimeSeriesRequest {
    /// Assemble a request; contacts nothing
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        project_id: &str,
        filter: impl Into<String>,
        interval: TimeInterval,
        page_size: u32,
        full_view: bool,
        alignment_period_seconds: u64,
        per_series_aligner: Aligner,
    ) -> Self {
        Self {
            name: format!("projects/{project_id}"),
            filter: filter.into(),
            interval,
            aggregation: Aggregation {
                alignment_period_seconds,
                per_series_aligner,
            },
            view: TimeSeriesView::from_full(full_view),
            page_size,
            page_token: None,
        }
    }

    /// Set or clear the continuation token
    pub fn set_page_token(&mut self, token: Option<String>) {
        self.page_token = token;
    }

    /// Resource path of the list call, relative to the API base
    pub fn path(&self) -> String {
        format!("{}/timeSeries", self.name)
    }

    /// Query parameters in REST form
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("filter".to_string(), self.filter.clone()),
            (
                "interval.startTime".to_string(),
                self.interval
                    .start_time
                    .to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
            (
                "interval.endTime".to_string(),
                self.interval
                    .end_time
                    .to_rfc3339_opts(SecondsFormat::Nanos, true),
            ),
            (
                "aggregation.alignmentPeriod".to_string(),
                format!("{}s", self.aggregation.alignment_period_seconds),
            ),
            (
                "aggregation.perSeriesAligner".to_string(),
                self.aggregation.per_series_aligner.as_str().to_string(),
            ),
            ("view".to_string(), self.view.as_str().to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];

        if let Some(token) = &self.page_token {
            params.push(("pageToken".to_string(), token.clone()));
        }

        params
    }
}
