//! Execution engine module
//!
//! Drives one export per metric filter.
//!
//! # Overview
//!
//! For each filter the engine builds the query, then loops
//! fetch → flatten → stage → upload once per page until the continuation
//! token comes back empty. A single load job then reads every page of the
//! run through one glob. Filters run one after another and share the run
//! timestamp; the first failure aborts the run.

mod types;

pub use types::{ExportSummary, RunSummary};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::filter::MetricFilter;
use crate::monitoring::{ListTimeSeriesRequest, Lookback, MetricsFetcher, TimeInterval};
use crate::output::{BucketUploader, LocalStager};
use crate::pagination::{NextPage, PageTokenPaginator, PaginationState};
use crate::record::flatten;
use crate::types::ExportTimestamp;
use crate::warehouse::{LoadRequest, WarehouseLoader};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Export engine for moving time series into the warehouse
pub struct ExportEngine {
    config: ExportConfig,
    fetcher: Arc<dyn MetricsFetcher>,
    uploader: BucketUploader,
    loader: Arc<dyn WarehouseLoader>,
    stager: LocalStager,
    run: ExportTimestamp,
    paginator: PageTokenPaginator,
}

impl ExportEngine {
    /// Create an engine; pages are staged under `config.staging_dir`
    pub fn new(
        config: ExportConfig,
        fetcher: Arc<dyn MetricsFetcher>,
        uploader: BucketUploader,
        loader: Arc<dyn WarehouseLoader>,
        run: ExportTimestamp,
    ) -> Self {
        let stager = LocalStager::new(config.staging_dir.clone());
        Self {
            config,
            fetcher,
            uploader,
            loader,
            stager,
            run,
            paginator: PageTokenPaginator::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Timestamp shared by every filter of this run
    pub fn run_timestamp(&self) -> ExportTimestamp {
        self.run
    }

    /// First request of a filter's listing
    pub fn build_request(
        &self,
        filter: &MetricFilter,
        interval: TimeInterval,
    ) -> ListTimeSeriesRequest {
        ListTimeSeriesRequest::new(
            &self.config.project_id,
            filter.expression(),
            interval,
            self.config.page_size,
            self.config.full_view,
            self.config.seconds,
            self.config.aligner,
        )
    }

    /// `<table>/<subject>` prefix every page of a filter lands under
    pub fn file_prefix(&self, filter: &MetricFilter) -> Result<String> {
        Ok(format!("{}/{}", self.config.table, filter.subject()?))
    }

    /// Export one filter through to the warehouse load
    pub async fn export_filter(&self, filter: &MetricFilter) -> Result<ExportSummary> {
        let subject = filter.subject()?.to_string();
        let file_prefix = self.file_prefix(filter)?;

        let interval = TimeInterval::ending_now(&Lookback::seconds(self.config.seconds));
        debug!(
            start = %interval.start_time,
            end = %interval.end_time,
            "Query interval"
        );
        let mut request = self.build_request(filter, interval);
        info!("Building query for filter {filter}");

        let mut state = PaginationState::new();
        let mut objects = Vec::new();

        loop {
            let page_number = state.page + 1;
            let page = self.fetcher.fetch(&request).await?;
            if !page.execution_errors.is_empty() {
                warn!(
                    page = page_number,
                    errors = page.execution_errors.len(),
                    "List call reported execution errors"
                );
            }

            let records = flatten(&page.time_series)?;
            let local_path = self.stager.stage(&file_prefix, page_number, &records)?;
            let key = self
                .uploader
                .upload(&file_prefix, &self.run, page_number, &local_path)
                .await?;
            objects.push(key);

            match self.paginator.process_page(
                Some(page.next_page_token),
                records.len(),
                &mut state,
            ) {
                NextPage::Continue { page_token } => {
                    debug!(page = page_number, "Following continuation token");
                    request.set_page_token(Some(page_token));
                }
                NextPage::Done => break,
            }
        }

        let source_uri = self.uploader.run_glob(&file_prefix, &self.run);
        let load_request = LoadRequest::new(
            &self.config.project_id,
            &self.config.dataset,
            &self.config.table,
            &source_uri,
        );
        let load = self.loader.load(&load_request).await?;

        info!(
            pages = state.page,
            records = state.total_fetched,
            "Exported {subject} into {}",
            load.table_id
        );

        Ok(ExportSummary {
            subject,
            pages: state.page,
            records: state.total_fetched as usize,
            objects,
            source_uri,
            load,
        })
    }

    /// Export every filter in order, stopping at the first failure
    pub async fn run(&self, filters: &[MetricFilter]) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::new();

        info!(run = %self.run, filters = filters.len(), "Starting export run");

        for filter in filters {
            let export = self.export_filter(filter).await.inspect_err(|e| {
                warn!("Export of {filter} failed: {e}");
            })?;
            summary.add_export(export);
        }

        summary.set_duration(start.elapsed());
        info!(
            filters = summary.exports.len(),
            pages = summary.total_pages(),
            records = summary.total_records(),
            "Completed export run in {}ms",
            summary.duration.as_millis()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests;
