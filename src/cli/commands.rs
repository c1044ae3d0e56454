//! CLI arguments and argument parsing

use crate::config::{split_filter_list, Settings};
use crate::types::Aligner;
use clap::Parser;
use std::path::PathBuf;

/// Export monitoring time series into a warehouse table via a bucket
#[derive(Parser, Debug)]
#[command(name = "monitoring-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML); flags and environment override it
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Project holding the metrics
    #[arg(long, env = "EXPORT_PROJECT")]
    pub project: Option<String>,

    /// Lookback window in seconds [default: 3600]
    #[arg(long, env = "EXPORT_SECONDS")]
    pub seconds: Option<u64>,

    /// Destination dataset
    #[arg(long, env = "EXPORT_DATASET")]
    pub dataset: Option<String>,

    /// Destination table
    #[arg(long, env = "EXPORT_TABLE")]
    pub table: Option<String>,

    /// Page size of the list call [default: 500]
    #[arg(long = "size", env = "EXPORT_PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Staging bucket (with or without gs://)
    #[arg(long, env = "EXPORT_BUCKET")]
    pub bucket: Option<String>,

    /// Metric types to export (comma-separated)
    #[arg(long, env = "EXPORT_FILTERS")]
    pub filters: Option<String>,

    /// Per-series aligner [default: ALIGN_MEAN]
    #[arg(long)]
    pub aligner: Option<Aligner>,

    /// Fetch series headers only, without points
    #[arg(long)]
    pub headers_only: bool,

    /// Directory for staged page files [default: OS temp dir]
    #[arg(long)]
    pub staging_dir: Option<PathBuf>,

    /// Load job location
    #[arg(long)]
    pub location: Option<String>,

    /// Delay between load job polls [default: 1000]
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// HTTP request timeout (none by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings given on the command line or through the environment
    pub fn settings(&self) -> Settings {
        Settings {
            project: self.project.clone(),
            seconds: self.seconds,
            dataset: self.dataset.clone(),
            table: self.table.clone(),
            page_size: self.page_size,
            bucket: self.bucket.clone(),
            filters: self.filters.as_deref().map(split_filter_list),
            aligner: self.aligner,
            headers_only: self.headers_only.then_some(true),
            staging_dir: self.staging_dir.clone(),
            location: self.location.clone(),
            poll_interval_ms: self.poll_interval_ms,
            timeout_secs: self.timeout_secs,
        }
    }
}
