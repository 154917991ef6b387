//! Trade domain — orders, signed submissions, results, attempt state.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TradeError;
use crate::shared::{Address, Side, TokenId, ZIL_HASH};

pub use state::{AttemptPhase, TradeAttempt};

/// Expiry used when the caller does not set one, in blocks.
pub const DEFAULT_EXPIRY_BLOCKS: u64 = 100;

// ─── TokenRef / Price ────────────────────────────────────────────────────────

/// Reference to one NFT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub collection_address: Address,
    pub token_id: TokenId,
}

/// An amount denominated in a currency (fungible token contract address).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount: Decimal,
    #[serde(rename = "address")]
    pub currency_address: Address,
}

impl Price {
    pub fn new(amount: Decimal, currency_address: impl Into<Address>) -> Self {
        Self {
            amount,
            currency_address: currency_address.into(),
        }
    }

    /// A price in native ZIL.
    pub fn zil(amount: Decimal) -> Self {
        Self::new(amount, ZIL_HASH)
    }
}

// ─── TradeOrder ──────────────────────────────────────────────────────────────

/// One proposed buy or sell of a single NFT.
///
/// Built with [`OrderBuilder`]; owned by the attempt that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOrder {
    pub side: Side,
    pub token: TokenRef,
    pub price: Price,
    pub fee_amount: Decimal,
    pub expiry: u64,
    pub nonce: u64,
}

impl TradeOrder {
    pub fn builder() -> OrderBuilder {
        OrderBuilder::new()
    }

    /// Check the field constraints a signable order must satisfy.
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.token.collection_address.is_blank() {
            return Err(invalid("collection address is empty"));
        }
        if self.token.token_id.is_blank() {
            return Err(invalid("token id is empty"));
        }
        if self.price.currency_address.is_blank() {
            return Err(invalid("price currency address is empty"));
        }
        if self.price.amount < Decimal::ZERO {
            return Err(invalid("price amount is negative"));
        }
        if self.fee_amount < Decimal::ZERO {
            return Err(invalid("fee amount is negative"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> TradeError {
    TradeError::InvalidOrderInput(reason.to_string())
}

// ─── OrderBuilder ────────────────────────────────────────────────────────────

/// Builder for [`TradeOrder`] with a fluent API.
///
/// Every field except `expiry` is required; `build` reports the first missing
/// or malformed one as [`TradeError::InvalidOrderInput`].
///
/// ```rust,ignore
/// let order = TradeOrder::builder()
///     .side(Side::Buy)
///     .collection("0x8ab2...")
///     .token_id("42")
///     .price(Price::zil(dec!(10000)))
///     .fee_amount(dec!(250))
///     .nonce(0)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderBuilder {
    side: Option<Side>,
    collection: Option<Address>,
    token_id: Option<TokenId>,
    price: Option<Price>,
    fee_amount: Option<Decimal>,
    expiry: Option<u64>,
    nonce: Option<u64>,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill side, token and terms from navigation context.
    ///
    /// Missing route parameters are left unset so `build` rejects them.
    pub fn from_route(side: Side, route: &RouteParams, terms: &TradeTerms) -> Self {
        let mut builder = Self::new()
            .side(side)
            .price(terms.price.clone())
            .fee_amount(terms.fee_amount)
            .expiry(terms.expiry)
            .nonce(terms.nonce);
        if let Some(collection) = &route.collection {
            builder = builder.collection(collection.as_str());
        }
        if let Some(id) = &route.id {
            builder = builder.token_id(id.as_str());
        }
        builder
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn buy(self) -> Self {
        self.side(Side::Buy)
    }

    pub fn sell(self) -> Self {
        self.side(Side::Sell)
    }

    pub fn collection(mut self, address: impl Into<Address>) -> Self {
        self.collection = Some(address.into());
        self
    }

    pub fn token_id(mut self, id: impl Into<TokenId>) -> Self {
        self.token_id = Some(id.into());
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn fee_amount(mut self, fee: Decimal) -> Self {
        self.fee_amount = Some(fee);
        self
    }

    /// Block count after which the order is void. Defaults to [`DEFAULT_EXPIRY_BLOCKS`].
    pub fn expiry(mut self, expiry: u64) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Replay-protection nonce. Uniqueness is the caller's responsibility.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn build(self) -> Result<TradeOrder, TradeError> {
        let order = TradeOrder {
            side: self.side.ok_or_else(|| invalid("side is required"))?,
            token: TokenRef {
                collection_address: self
                    .collection
                    .ok_or_else(|| invalid("collection address is required"))?,
                token_id: self.token_id.ok_or_else(|| invalid("token id is required"))?,
            },
            price: self.price.ok_or_else(|| invalid("price is required"))?,
            fee_amount: self
                .fee_amount
                .ok_or_else(|| invalid("fee amount is required"))?,
            expiry: self.expiry.unwrap_or(DEFAULT_EXPIRY_BLOCKS),
            nonce: self.nonce.ok_or_else(|| invalid("nonce is required"))?,
        };
        order.validate()?;
        Ok(order)
    }
}

// ─── Call-site context ───────────────────────────────────────────────────────

/// Route parameters from the current NFT page (`/collection/:collection/:id`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    pub collection: Option<String>,
    pub id: Option<String>,
}

impl RouteParams {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            id: Some(id.into()),
        }
    }
}

/// Commercial terms of a trade, independent of which token it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeTerms {
    pub price: Price,
    pub fee_amount: Decimal,
    pub expiry: u64,
    pub nonce: u64,
}

impl TradeTerms {
    pub fn new(price: Price, fee_amount: Decimal) -> Self {
        Self {
            price,
            fee_amount,
            expiry: DEFAULT_EXPIRY_BLOCKS,
            nonce: 0,
        }
    }

    pub fn expiry(mut self, expiry: u64) -> Self {
        self.expiry = expiry;
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }
}

// ─── Signed submission / result ──────────────────────────────────────────────

/// A [`TradeOrder`] together with the wallet's authorization of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSubmission {
    pub order: TradeOrder,
    /// Address of the signing wallet.
    pub address: Address,
    pub public_key: String,
    pub signature: String,
}

/// Decoded outcome of an accepted trade submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeResult {
    /// Status string reported by the trading service; `None` when the
    /// response body carried none.
    pub status: Option<String>,
    /// Remaining response fields, untouched.
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// A trade record as listed by the trading service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: Option<String>,
    pub side: Side,
    pub token: TokenRef,
    pub address: Address,
    pub price: Price,
    pub expiry: u64,
    pub nonce: u64,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
