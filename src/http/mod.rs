//! HTTP client module
//!
//! Thin wrapper over `reqwest` shared by the monitoring and warehouse clients.
//!
//! # Features
//!
//! - **Base URL**: Relative paths resolve against a configured base
//! - **Authentication**: Integration with auth module
//! - **Status mapping**: Non-success responses become `Error::HttpStatus`
//!
//! Calls are never retried; a failed call is returned to the caller as-is.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
