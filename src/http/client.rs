//! Low-level HTTP client — `ArkHttp`.
//!
//! Thin transport over `reqwest`: URL joining, bearer token injection,
//! status → [`HttpError`] mapping and retry. Endpoint methods live on the
//! domain sub-clients.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Transport timeout applied when the builder does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the Ark REST API.
#[derive(Clone)]
pub struct ArkHttp {
    base_url: String,
    client: Client,
    /// Bearer token from the separate login flow. Never exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl ArkHttp {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            auth_token: Arc::new(RwLock::new(auth_token)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub(crate) async fn has_auth_token(&self) -> bool {
        self.auth_token.read().await.is_some()
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(&method, url, body).await;
        };

        let mut attempt = 0;
        loop {
            let err = match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => e,
            };

            if !config.should_retry(&err) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }

            let delay = retry_delay(&config, &err, attempt);
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "Retrying request to {}",
                url
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.bearer_auth(token);
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Reqwest(e)
            }
        })?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body_text = resp.text().await.unwrap_or_default();
        let message = server_message(&body_text);

        tracing::debug!(status = status_code, %message, "Request to {} failed", url);

        Err(match status_code {
            401 => HttpError::Unauthorized(message),
            403 => HttpError::Forbidden(message),
            404 => HttpError::NotFound(message),
            429 => HttpError::RateLimited {
                retry_after_ms,
                message,
            },
            400..=499 => HttpError::BadRequest(message),
            _ => HttpError::ServerError {
                status: status_code,
                body: message,
            },
        })
    }
}

/// `Retry-After` in delta-seconds, as milliseconds.
fn parse_retry_after(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

/// Wait before the next attempt. A server-requested delay never exceeds `max_delay`.
fn retry_delay(config: &RetryConfig, err: &HttpError, attempt: u32) -> Duration {
    match err {
        HttpError::RateLimited {
            retry_after_ms: Some(ms),
            ..
        } => Duration::from_millis(*ms).min(config.max_delay),
        _ => config.delay_for_attempt(attempt),
    }
}

/// Error body the API returns with non-2xx statuses.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "error")]
    message: Option<String>,
}

/// Extract the server's `message`/`error` field from a JSON error body,
/// falling back to the raw body text.
fn server_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.status))
        .unwrap_or_else(|| body.trim().to_string())
}
