//! Authentication module
//!
//! Supports: no auth, static bearer token, service account key file,
//! instance metadata server token, application default credentials
//!
//! Credentials are never handled by the exporter itself. The `Authenticator`
//! picks up whatever the host environment already provides. Metadata-server
//! tokens are cached here until shortly before they expire; key-file and
//! default credentials are delegated to `gcp_auth`, which caches its own.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{
    AuthConfig, CachedToken, ACCESS_TOKEN_ENV, CLOUD_PLATFORM_SCOPE, CREDENTIALS_FILE_ENV,
    METADATA_HOST_ENV,
};
