//! CLI module
//!
//! Command-line interface for running an export.
//!
//! Every flag can also come from an `EXPORT_*` environment variable or from
//! a YAML settings file given with `--config`.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
