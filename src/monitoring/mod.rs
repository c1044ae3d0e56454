//! Monitoring API module
//!
//! Everything needed to pull time series out of the monitoring backend:
//! - `Lookback` / `TimeInterval` - the `[start, end)` window ending now
//! - `ListTimeSeriesRequest` - the list call description
//! - `MetricsFetcher` - one list call per invocation, implemented over REST
//!   by `MonitoringClient`
//! - Wire types for the returned page (`TimeSeriesPage`, `TimeSeries`, ...)

mod client;
mod interval;
mod query;
mod types;

pub use client::{MetricsFetcher, MonitoringClient, MONITORING_API_BASE};
pub use interval::{Lookback, TimeInterval};
pub use query::{Aggregation, ListTimeSeriesRequest};
pub use types::{
    Metric, MonitoredResource, Point, PointInterval, TimeSeries, TimeSeriesPage, TypedValue,
};
