//! Output module
//!
//! Moves flattened records from memory into the bucket.
//!
//! # Overview
//!
//! This module provides:
//! - `LocalStager` - writes one page of records as newline-delimited JSON to
//!   a temporary local file
//! - `BucketUploader` - uploads a staged file under
//!   `<prefix>/<export-timestamp>/<page>.jsonl` and removes the local copy

mod cloud;
mod staging;

pub use cloud::{object_path, BucketUploader};
pub use staging::{sanitize_prefix, LocalStager};

#[cfg(test)]
mod tests;
