//! Load request/summary and BigQuery REST payloads

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// One load of a run's objects into a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub project_id: String,
    pub dataset: String,
    pub table: String,
    /// Source URI, may end in a `*` wildcard
    pub source_uri: String,
}

impl LoadRequest {
    /// Create a load request
    pub fn new(
        project_id: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
        source_uri: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset: dataset.into(),
            table: table.into(),
            source_uri: source_uri.into(),
        }
    }

    /// Fully qualified `project.dataset.table`
    pub fn table_id(&self) -> String {
        format!("{}.{}.{}", self.project_id, self.dataset, self.table)
    }
}

/// Table shape after a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table_id: String,
    pub num_rows: u64,
    pub num_columns: usize,
}

// ============================================================================
// REST payloads
// ============================================================================

/// Job resource (only the fields the loader reads)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default)]
    pub job_reference: JobReference,
    #[serde(default)]
    pub status: JobStatus,
}

/// Identifies a job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    #[serde(default)]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Job progress
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// PENDING, RUNNING or DONE
    #[serde(default)]
    pub state: String,
    /// Set when a DONE job failed
    #[serde(default)]
    pub error_result: Option<ErrorProto>,
    #[serde(default)]
    pub errors: Vec<ErrorProto>,
}

impl JobStatus {
    /// Whether the job reached a terminal state
    pub fn is_done(&self) -> bool {
        self.state.eq_ignore_ascii_case("DONE")
    }
}

/// Error detail attached to a job
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorProto {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub location: String,
}

impl std::fmt::Display for ErrorProto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.reason.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.reason, self.message)
        }
    }
}

/// Table resource (only the fields the loader reads)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// int64 encoded as a string
    #[serde(default)]
    pub num_rows: Option<String>,
    #[serde(default)]
    pub schema: TableSchema,
}

/// Column list of a table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<JsonValue>,
}
