//! HTTP client layer — `ArkHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::{ArkHttp, DEFAULT_TIMEOUT};
pub use retry::{RetryConfig, RetryPolicy};
