//! Engine types
//!
//! Per-filter and per-run summaries returned by the export engine.

use crate::warehouse::LoadSummary;
use std::time::Duration;

/// Outcome of exporting one metric filter
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    /// Quoted metric type of the filter
    pub subject: String,
    /// Pages fetched (and staged)
    pub pages: u32,
    /// Flat records written across all pages
    pub records: usize,
    /// Object keys uploaded, in page order
    pub objects: Vec<String>,
    /// Glob the load job read from
    pub source_uri: String,
    /// Result of the load job
    pub load: LoadSummary,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One entry per filter, in processing order
    pub exports: Vec<ExportSummary>,
    /// Wall time of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished export
    pub fn add_export(&mut self, export: ExportSummary) {
        self.exports.push(export);
    }

    /// Total pages across filters
    pub fn total_pages(&self) -> u32 {
        self.exports.iter().map(|e| e.pages).sum()
    }

    /// Total records across filters
    pub fn total_records(&self) -> usize {
        self.exports.iter().map(|e| e.records).sum()
    }

    /// Set duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }
}
