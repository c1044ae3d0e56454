//! BigQuery load jobs over REST

use super::types::{Job, JobReference, LoadRequest, LoadSummary, Table};
use super::WarehouseLoader;
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Base URL of the BigQuery v2 REST API
pub const BIGQUERY_API_BASE: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Source format of the staged objects
const SOURCE_FORMAT: &str = "NEWLINE_DELIMITED_JSON";

/// Existing columns are kept, new ones may be appended
const SCHEMA_UPDATE_OPTIONS: [&str; 1] = ["ALLOW_FIELD_ADDITION"];

/// `WarehouseLoader` backed by BigQuery load jobs
#[derive(Debug)]
pub struct BigQueryLoader {
    client: HttpClient,
    base_url: String,
    location: Option<String>,
    poll_interval: Duration,
}

impl BigQueryLoader {
    /// Loader over an HTTP client, against `base_url`
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            location: None,
            poll_interval: Duration::from_secs(1),
        }
    }

    /// Loader for the public endpoint with host-provided credentials
    pub fn from_env(timeout: Option<Duration>) -> Result<Self> {
        Self::with_endpoint(BIGQUERY_API_BASE, AuthConfig::from_env(), timeout)
    }

    /// Loader for a specific endpoint
    pub fn with_endpoint(
        base_url: &str,
        auth: AuthConfig,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = HttpClientConfig::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = HttpClient::with_auth(builder.build(), auth)?;
        Ok(Self::new(client, base_url))
    }

    /// Run jobs in a specific location
    #[must_use]
    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location;
        self
    }

    /// Delay between job status polls
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Job insert body for a request
    pub fn job_body(&self, request: &LoadRequest) -> Value {
        let reference = JobReference {
            project_id: request.project_id.clone(),
            job_id: String::new(),
            location: self.location.clone(),
        };

        json!({
            "jobReference": reference,
            "configuration": {
                "load": {
                    "sourceUris": [request.source_uri],
                    "destinationTable": {
                        "projectId": request.project_id,
                        "datasetId": request.dataset,
                        "tableId": request.table,
                    },
                    "sourceFormat": SOURCE_FORMAT,
                    "autodetect": true,
                    "schemaUpdateOptions": SCHEMA_UPDATE_OPTIONS,
                    "writeDisposition": "WRITE_APPEND",
                }
            }
        })
    }

    /// Absolute URL below the API base, segments percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::config(format!("Invalid API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    async fn insert_job(&self, request: &LoadRequest) -> Result<Job> {
        let url = self.endpoint(&["projects", &request.project_id, "jobs"])?;
        self.client.post_json(&url, self.job_body(request)).await
    }

    async fn get_job(&self, reference: &JobReference) -> Result<Job> {
        let url = self.endpoint(&["projects", &reference.project_id, "jobs", &reference.job_id])?;
        let mut config = RequestConfig::new();
        if let Some(location) = reference.location.as_ref().or(self.location.as_ref()) {
            config = config.query("location", location);
        }
        self.client.get_json_with_config(&url, config).await
    }

    async fn get_table(&self, request: &LoadRequest) -> Result<Table> {
        let url = self.endpoint(&[
            "projects",
            &request.project_id,
            "datasets",
            &request.dataset,
            "tables",
            &request.table,
        ])?;
        self.client.get_json(&url).await
    }

    /// Poll until the job is terminal
    async fn wait_for_job(&self, mut job: Job) -> Result<Job> {
        while !job.status.is_done() {
            debug!(
                job_id = %job.job_reference.job_id,
                state = %job.status.state,
                "Waiting for load job"
            );
            tokio::time::sleep(self.poll_interval).await;
            job = self.get_job(&job.job_reference).await?;
        }
        Ok(job)
    }
}

#[async_trait]
impl WarehouseLoader for BigQueryLoader {
    async fn load(&self, request: &LoadRequest) -> Result<LoadSummary> {
        let table_id = request.table_id();
        info!("BigQuery load destination: {table_id}");
        debug!(source = %request.source_uri, "Starting load job");

        let job = self.insert_job(request).await?;
        if job.job_reference.job_id.is_empty() && !job.status.is_done() {
            return Err(Error::decode("Load job response has no job id"));
        }

        let job = self.wait_for_job(job).await?;
        if let Some(error) = &job.status.error_result {
            return Err(Error::load_job(&job.job_reference.job_id, error.to_string()));
        }

        let table = self.get_table(request).await?;
        let num_rows = match table.num_rows.as_deref() {
            Some(raw) => raw
                .parse()
                .map_err(|e| Error::decode(format!("Invalid numRows '{raw}': {e}")))?,
            None => 0,
        };
        let summary = LoadSummary {
            table_id,
            num_rows,
            num_columns: table.schema.fields.len(),
        };

        info!(
            "Load job completed, total rows number is {} and with {} columns on {}",
            summary.num_rows, summary.num_columns, summary.table_id
        );
        Ok(summary)
    }
}
