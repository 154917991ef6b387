//! High-level client — `ArkClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared state and accessor methods.

use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::http::{ArkHttp, DEFAULT_TIMEOUT};
use crate::network::Network;

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::trade::client::Trades as TradesClient;

/// Environment variable selecting the network (`mainnet` / `testnet`).
pub const ENV_NETWORK: &str = "ARK_NETWORK";
/// Environment variable overriding the REST API base URL.
pub const ENV_API_URL: &str = "ARK_API_URL";
/// Environment variable holding a bearer token from the login flow.
pub const ENV_AUTH_TOKEN: &str = "ARK_AUTH_TOKEN";

/// The primary entry point for the Ark SDK.
///
/// Cheap to clone; clones share the HTTP connection pool and auth token.
#[derive(Clone)]
pub struct ArkClient {
    pub(crate) http: ArkHttp,
    pub(crate) network: Network,
}

impl ArkClient {
    pub fn builder() -> ArkClientBuilder {
        ArkClientBuilder::default()
    }

    /// Client for `network` with default settings.
    pub fn new(network: Network) -> Result<Self, SdkError> {
        Self::builder().network(network).build()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    /// Replace the bearer token obtained from the separate login flow.
    pub async fn set_auth_token(&self, token: impl Into<String>) {
        self.http.set_auth_token(Some(token.into())).await;
    }

    pub async fn clear_auth_token(&self) {
        self.http.set_auth_token(None).await;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.http.has_auth_token().await
    }
}

impl std::fmt::Debug for ArkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArkClient")
            .field("network", &self.network)
            .field("base_url", &self.http.base_url())
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ArkClientBuilder {
    network: Network,
    base_url: Option<String>,
    auth_token: Option<String>,
    timeout: Duration,
}

impl Default for ArkClientBuilder {
    fn default() -> Self {
        Self {
            network: Network::default(),
            base_url: None,
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ArkClientBuilder {
    /// Builder seeded from `ARK_NETWORK`, `ARK_API_URL` and `ARK_AUTH_TOKEN`.
    ///
    /// Unset variables keep their defaults; an unknown network name is an error.
    pub fn from_env() -> Result<Self, SdkError> {
        let mut builder = Self::default();
        if let Some(network) = env_var(ENV_NETWORK) {
            builder.network = network.parse().map_err(SdkError::Validation)?;
        }
        builder.base_url = env_var(ENV_API_URL);
        builder.auth_token = env_var(ENV_AUTH_TOKEN);
        Ok(builder)
    }

    /// Target network. Also selects the default base URL and cheque domain.
    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Override the network's default REST API base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Pre-set a bearer token on construction.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Transport timeout for every request (native only).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ArkClient, SdkError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| self.network.api_url().to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SdkError::Validation(format!(
                "base url must be http(s): {}",
                base_url
            )));
        }

        let http = ArkHttp::new(&base_url, self.timeout, self.auth_token)?;

        tracing::debug!(network = %self.network, %base_url, "ark client built");
        Ok(ArkClient {
            http,
            network: self.network,
        })
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
