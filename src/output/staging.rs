//! Newline-delimited JSON staging files

use crate::error::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Replace every character that is unsafe in a file name with `_`
///
/// Distinct prefixes can collide (`a/b` and `a_b` both become `a_b`). Filters
/// run one at a time and each staged file is removed after upload, so a
/// collision never overwrites a live page.
pub fn sanitize_prefix(prefix: &str) -> String {
    prefix
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes pages of records into a staging directory
#[derive(Debug, Clone)]
pub struct LocalStager {
    dir: PathBuf,
}

impl LocalStager {
    /// Stage into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Stage into the OS temp directory
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Staging directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Local path used for a page; the same inputs always give the same path
    pub fn staged_path(&self, file_prefix: &str, page_number: u32) -> PathBuf {
        self.dir
            .join(format!("{}_{page_number}.jsonl", sanitize_prefix(file_prefix)))
    }

    /// Write `records` one JSON object per line, replacing any previous file
    pub fn stage<T: Serialize>(
        &self,
        file_prefix: &str,
        page_number: u32,
        records: &[T],
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.staged_path(file_prefix, page_number);
        info!("Writing data point into local path {}", path.display());

        let mut writer = BufWriter::new(File::create(&path)?);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        info!(
            records = records.len(),
            "Writing tmp file {} completed with no errors",
            path.display()
        );
        Ok(path)
    }
}
