//! CLI runner - resolves settings and executes the export

use crate::cli::commands::Cli;
use crate::config::{ExportConfig, Settings};
use crate::engine::{ExportEngine, RunSummary};
use crate::error::Result;
use crate::monitoring::MonitoringClient;
use crate::output::BucketUploader;
use crate::types::ExportTimestamp;
use crate::warehouse::BigQueryLoader;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Settings file (if any) overlaid with command-line values
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.cli.config {
            Some(path) => {
                debug!("Reading settings from {}", path.display());
                Settings::from_file(path)?
            }
            None => Settings::default(),
        };
        Ok(file.merge(self.cli.settings()))
    }

    /// Run the export
    pub async fn run(&self) -> Result<()> {
        let config = self.settings()?.resolve()?;
        let filters = config.metric_filters();
        let engine = Self::build_engine(config)?;

        let summary = engine.run(&filters).await?;
        Self::report(&summary);
        Ok(())
    }

    /// Wire the production backends into an engine
    pub fn build_engine(config: ExportConfig) -> Result<ExportEngine> {
        let fetcher = Arc::new(MonitoringClient::from_env(config.timeout)?);
        let uploader = BucketUploader::gcs(&config.bucket)?;
        let loader = Arc::new(
            BigQueryLoader::from_env(config.timeout)?
                .with_location(config.location.clone())
                .with_poll_interval(config.poll_interval),
        );

        Ok(ExportEngine::new(
            config,
            fetcher,
            uploader,
            loader,
            ExportTimestamp::now(),
        ))
    }

    /// One JSON line per exported filter
    fn report(summary: &RunSummary) {
        for export in &summary.exports {
            let line = json!({
                "subject": export.subject,
                "pages": export.pages,
                "records": export.records,
                "source": export.source_uri,
                "table": export.load.table_id,
                "rows": export.load.num_rows,
                "columns": export.load.num_columns,
            });
            println!("{line}");
        }
    }
}
