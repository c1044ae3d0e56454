//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken, CLOUD_PLATFORM_SCOPE};
use crate::error::{Error, Result};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::debug;

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for metadata server auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
    /// Key-file or default credentials provider, built on first use
    provider: OnceCell<Arc<dyn TokenProvider>>,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
            provider: OnceCell::new(),
        }
    }

    /// Get the auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::MetadataServer { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
            AuthConfig::ServiceAccountKey { .. } | AuthConfig::ApplicationDefault => {
                let token = self.provider_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Token from the `gcp_auth` provider, which refreshes on its own
    async fn provider_token(&self) -> Result<String> {
        let provider = self
            .provider
            .get_or_try_init(|| self.build_provider())
            .await?;
        let token = provider
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| Error::auth(format!("Token request failed: {e}")))?;
        Ok(token.as_str().to_string())
    }

    async fn build_provider(&self) -> Result<Arc<dyn TokenProvider>> {
        match &self.config {
            AuthConfig::ServiceAccountKey { path } => {
                debug!("Loading service account key from {}", path.display());
                let account = CustomServiceAccount::from_file(path).map_err(|e| {
                    Error::auth(format!(
                        "Invalid service account key {}: {e}",
                        path.display()
                    ))
                })?;
                let provider: Arc<dyn TokenProvider> = Arc::new(account);
                Ok(provider)
            }
            _ => {
                debug!("Resolving application default credentials");
                gcp_auth::provider()
                    .await
                    .map_err(|e| Error::auth(format!("No default credentials found: {e}")))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::MetadataServer { token_url } => self.fetch_metadata_token(token_url).await,
            _ => Err(Error::auth(
                "Token refresh not supported for this auth type",
            )),
        }
    }

    /// Ask the metadata server for the default service account's token
    async fn fetch_metadata_token(&self, token_url: &str) -> Result<CachedToken> {
        debug!("Requesting access token from {token_url}");

        let response = self
            .http_client
            .get(token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| Error::auth(format!("Metadata server unreachable: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.config {
            AuthConfig::None => "none",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::ServiceAccountKey { .. } => "service_account_key",
            AuthConfig::MetadataServer { .. } => "metadata_server",
            AuthConfig::ApplicationDefault => "application_default",
        };
        f.debug_struct("Authenticator")
            .field("kind", &kind)
            .finish_non_exhaustive()
    }
}

/// Token response from the metadata server
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}
