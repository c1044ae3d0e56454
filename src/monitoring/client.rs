//! Monitoring REST client

use super::query::ListTimeSeriesRequest;
use super::types::TimeSeriesPage;
use crate::auth::AuthConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Base URL of the monitoring v3 REST API
pub const MONITORING_API_BASE: &str = "https://monitoring.googleapis.com/v3";

/// Source of time series pages
///
/// Each call performs exactly one remote list call. Callers feed the returned
/// `next_page_token` back into the request until it comes back empty.
#[async_trait]
pub trait MetricsFetcher: Send + Sync {
    /// Fetch one page for `request`
    async fn fetch(&self, request: &ListTimeSeriesRequest) -> Result<TimeSeriesPage>;
}

/// `MetricsFetcher` over the monitoring REST API
#[derive(Debug)]
pub struct MonitoringClient {
    client: HttpClient,
}

impl MonitoringClient {
    /// Wrap an HTTP client whose base URL points at the API root
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Client for the public endpoint with host-provided credentials
    pub fn from_env(timeout: Option<Duration>) -> Result<Self> {
        Self::with_endpoint(MONITORING_API_BASE, AuthConfig::from_env(), timeout)
    }

    /// Client for a specific endpoint
    pub fn with_endpoint(
        base_url: &str,
        auth: AuthConfig,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = HttpClientConfig::builder().base_url(base_url);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = HttpClient::with_auth(builder.build(), auth)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl MetricsFetcher for MonitoringClient {
    async fn fetch(&self, request: &ListTimeSeriesRequest) -> Result<TimeSeriesPage> {
        info!("Sending API request to the monitoring backend");
        debug!(filter = %request.filter, page_token = ?request.page_token, "List time series");

        let config = RequestConfig::new().queries(request.query_params());
        let page: TimeSeriesPage = self
            .client
            .get_json_with_config(&request.path(), config)
            .await?;

        info!(
            series = page.time_series.len(),
            points = page.point_count(),
            "Got response from the server"
        );
        Ok(page)
    }
}
