//! Record module
//!
//! Turns time series pages into flat, warehouse-row-shaped records.
//!
//! # Overview
//!
//! Every `(metric, resource, point)` triple becomes one `FlatRecord`. The
//! point's `TypedValue` is projected onto four fixed value slots, and both
//! label collections are serialized to JSON strings, so every record has the
//! same columns no matter which labels a metric exposes.

mod flatten;
mod types;

pub use flatten::{flatten, flatten_point, serialize_labels};
pub use types::{FlatRecord, ValueSlots, TIME_FORMAT};

#[cfg(test)]
mod tests;
