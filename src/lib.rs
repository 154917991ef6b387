//! # Ark SDK
//!
//! Rust SDK for the Ark NFT marketplace: build a buy/sell order for one NFT,
//! have the user's wallet sign its cheque, and submit it to the trading API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, trade domain types, cheque derivation (always available)
//! 2. **Wallet** — The `WalletSigner` capability the caller injects
//! 3. **HTTP API** — `ArkHttp` with per-endpoint retry policies
//! 4. **High-Level Client** — `ArkClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ark_sdk::prelude::*;
//!
//! let client = ArkClient::builder().network(Network::Testnet).build()?;
//! let ctx = WalletContext::connected(wallet, Network::Testnet);
//! let terms = TradeTerms::new(Price::zil(dec!(10000)), dec!(250));
//!
//! let result = client
//!     .trades()
//!     .confirm(Side::Buy, &RouteParams::new("0x8ab2...", "42"), &ctx, &terms)
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Cheque hashing and signing messages.
pub mod cheque;

/// Unified SDK error types.
pub mod error;

/// Network selection and URL constants.
pub mod network;

// ── Layer 2: Wallet ──────────────────────────────────────────────────────────

/// Injected wallet capability.
pub mod wallet;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `ArkClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Address, Side, TokenId, ZIL_HASH};

    // Domain types — trade
    pub use crate::domain::trade::{
        AttemptPhase, OrderBuilder, Price, RouteParams, SignedSubmission, TokenRef, Trade,
        TradeAttempt, TradeOrder, TradeResult, TradeTerms, DEFAULT_EXPIRY_BLOCKS,
    };

    // Cheque
    pub use crate::cheque::{cheque_hash, cheque_message, MessageKind};

    // Errors
    pub use crate::error::{HttpError, SdkError, TradeError, WalletError};

    // Network
    pub use crate::network::{Network, DEFAULT_API_URL, TESTNET_API_URL};

    // Wallet
    pub use crate::wallet::{WalletContext, WalletSignature, WalletSigner};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{ArkClient, ArkClientBuilder, TradesClient};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
