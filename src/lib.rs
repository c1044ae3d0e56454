// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Monitoring Export
//!
//! Batch job that copies cloud monitoring time series into a warehouse
//! table, staging every page as newline-delimited JSON in a bucket.
//!
//! ## Features
//!
//! - **Paged extraction**: follows the list call's continuation token
//! - **Flat rows**: one row per data point with typed value slots
//! - **Bucket staging**: pages land under `<table>/<metric>/<run>/<page>.jsonl`
//! - **Single load per metric**: one load job globs every page of the run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use monitoring_export::{ExportEngine, MetricFilter, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = monitoring_export::Settings::from_file("export.yaml".as_ref())?.resolve()?;
//!     let filters = config.metric_filters();
//!     let engine = monitoring_export::cli::Runner::build_engine(config)?;
//!
//!     let summary = engine.run(&filters).await?;
//!     println!("{} records", summary.total_records());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         ExportEngine                             │
//! │   for each filter: query → pages → load job (one per filter)     │
//! └──────────────────────────────────────────────────────────────────┘
//!                                 │
//! ┌────────────┬──────────┬───────┴──────┬────────────┬─────────────┐
//! │ Monitoring │ Paginate │   Record     │  Output    │  Warehouse  │
//! ├────────────┼──────────┼──────────────┼────────────┼─────────────┤
//! │ Interval   │ Page     │ Flatten      │ Stage      │ Load job    │
//! │ Query      │ token    │ Labels→JSON  │ Upload     │ Poll        │
//! │ Fetch      │          │              │            │ Table shape │
//! └────────────┴──────────┴──────────────┴────────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bearer token resolution
pub mod auth;

/// HTTP client
pub mod http;

/// Continuation token pagination
pub mod pagination;

/// Monitoring API: interval, query and fetch
pub mod monitoring;

/// Flat records built from data points
pub mod record;

/// Metric filters
pub mod filter;

/// Local staging and bucket uploads
pub mod output;

/// Warehouse load jobs
pub mod warehouse;

/// Export orchestration
pub mod engine;

/// Settings file and resolved configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ExportConfig, Settings};
pub use engine::{ExportEngine, ExportSummary, RunSummary};
pub use error::{Error, Result};
pub use filter::MetricFilter;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
