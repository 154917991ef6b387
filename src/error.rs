//! Unified SDK error types.

use thiserror::Error;

use crate::domain::trade::state::AttemptPhase;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Trade error: {0}")]
    Trade(#[from] TradeError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer errors.
///
/// Variants carrying a `String` hold the server-provided message when the
/// response body had one, otherwise the raw body text.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited: {message}")]
    RateLimited {
        retry_after_ms: Option<u64>,
        message: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// HTTP status code the error was produced from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::ServerError { status, .. } => Some(*status),
            HttpError::RateLimited { .. } => Some(429),
            HttpError::Unauthorized(_) => Some(401),
            HttpError::Forbidden(_) => Some(403),
            HttpError::NotFound(_) => Some(404),
            HttpError::BadRequest(_) => Some(400),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            HttpError::Timeout | HttpError::MaxRetriesExceeded { .. } => None,
        }
    }

    /// Server-provided message, or a generic description of the failure.
    pub fn message(&self) -> String {
        match self {
            HttpError::ServerError { body, .. }
            | HttpError::RateLimited { message: body, .. }
            | HttpError::Unauthorized(body)
            | HttpError::Forbidden(body)
            | HttpError::NotFound(body)
            | HttpError::BadRequest(body)
                if !body.is_empty() =>
            {
                body.clone()
            }
            other => other.to_string(),
        }
    }
}

/// Errors raised by an injected wallet capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user (or the wallet's policy) declined to sign.
    #[error("{0}")]
    Rejected(String),

    /// The wallet or its signing device failed.
    #[error("{0}")]
    Device(String),
}

/// Failure of a single trade attempt.
///
/// Every variant is recoverable: the caller surfaces it and may start a new
/// attempt with a freshly built order.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Invalid order input: {0}")]
    InvalidOrderInput(String),

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Signing rejected: {0}")]
    SigningRejected(#[source] WalletError),

    #[error("Submission failed: {message}")]
    SubmissionFailed {
        status: Option<u16>,
        message: String,
    },
}

impl TradeError {
    /// The attempt phase in which this error occurs.
    pub fn phase(&self) -> AttemptPhase {
        match self {
            TradeError::InvalidOrderInput(_) => AttemptPhase::Building,
            TradeError::WalletNotConnected | TradeError::SigningRejected(_) => {
                AttemptPhase::Signing
            }
            TradeError::SubmissionFailed { .. } => AttemptPhase::Submitting,
        }
    }
}

impl From<HttpError> for TradeError {
    fn from(err: HttpError) -> Self {
        TradeError::SubmissionFailed {
            status: err.status(),
            message: err.message(),
        }
    }
}
