//! Auth configuration types
//!
//! These types describe where a bearer token comes from once the host
//! environment has been inspected.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Environment variable holding a ready-to-use OAuth2 access token
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Environment variable pointing at a service account key file
pub const CREDENTIALS_FILE_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// OAuth2 scope requested for REST calls
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Environment variable overriding the metadata server host
pub const METADATA_HOST_ENV: &str = "GCE_METADATA_HOST";

/// Token path on the metadata server
const METADATA_TOKEN_PATH: &str =
    "/computeMetadata/v1/instance/service-accounts/default/token";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Token minted from a service account key file
    ServiceAccountKey {
        /// Path to the JSON key
        path: PathBuf,
    },

    /// Token fetched from the instance metadata server
    MetadataServer {
        /// Full token endpoint URL
        token_url: String,
    },

    /// Application default credentials: gcloud user credentials, then the
    /// metadata server
    ApplicationDefault,
}

impl AuthConfig {
    /// Resolve auth from the process environment
    ///
    /// Order: a token in `GOOGLE_OAUTH_ACCESS_TOKEN`, the key file named by
    /// `GOOGLE_APPLICATION_CREDENTIALS`, an explicit `GCE_METADATA_HOST`,
    /// then application default credentials.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(ACCESS_TOKEN_ENV).ok(),
            std::env::var(CREDENTIALS_FILE_ENV).ok(),
            std::env::var(METADATA_HOST_ENV).ok(),
        )
    }

    /// Resolve auth from explicit variable values
    ///
    /// A configured key file never falls through to the metadata server.
    pub fn from_vars(
        access_token: Option<String>,
        credentials_file: Option<String>,
        metadata_host: Option<String>,
    ) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        if let Some(token) = present(access_token) {
            return Self::Bearer { token };
        }
        if let Some(path) = present(credentials_file) {
            return Self::ServiceAccountKey {
                path: PathBuf::from(path),
            };
        }
        match present(metadata_host) {
            Some(host) => Self::metadata_server(&host),
            None => Self::ApplicationDefault,
        }
    }

    /// Metadata server auth for a host (`host[:port]` or a full base URL)
    pub fn metadata_server(host: &str) -> Self {
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", host.trim_end_matches('/'))
        };
        Self::MetadataServer {
            token_url: format!("{base}{METADATA_TOKEN_PATH}"),
        }
    }
}

/// Cached authentication token
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The token value
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_inside_buffer() {
        let token = CachedToken::expires_in("test".to_string(), 10);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(matches!(config, AuthConfig::None));
    }
}
