//! Warehouse module
//!
//! Bulk-loads staged objects into a warehouse table.
//!
//! `WarehouseLoader` is the seam the export engine talks to; `BigQueryLoader`
//! implements it over the BigQuery v2 REST API with newline-delimited JSON
//! sources, schema auto-detection and field addition allowed.

mod bigquery;
mod types;

pub use bigquery::{BigQueryLoader, BIGQUERY_API_BASE};
pub use types::{
    ErrorProto, Job, JobReference, JobStatus, LoadRequest, LoadSummary, Table, TableSchema,
};

use crate::error::Result;
use async_trait::async_trait;

/// Triggers a load job and waits for it
#[async_trait]
pub trait WarehouseLoader: Send + Sync {
    /// Load every object matching `request.source_uri` into the table
    ///
    /// Blocks until the job is terminal; a failed job is returned as an error.
    async fn load(&self, request: &LoadRequest) -> Result<LoadSummary>;
}
