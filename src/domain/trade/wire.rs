//! Wire types for the trading API's trade endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::{Address, Side, TokenId};

// ─── Requests ───────────────────────────────────────────────────────────────

/// Price as the API encodes it: decimal string amount + currency address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PriceWire {
    pub amount: Decimal,
    pub address: Address,
}

/// Body of `POST /nft/trade/{collection}/{token_id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostTradeRequest {
    pub public_key: String,
    pub signature: String,
    pub address: String,
    pub collection_address: Address,
    pub token_id: TokenId,
    pub side: Side,
    pub price: PriceWire,
    pub fee_amount: Decimal,
    pub expiry: u64,
    pub nonce: u64,
}

// ─── Responses ──────────────────────────────────────────────────────────────

/// Response to a trade submission: `{status, ...}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PostTradeResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// One listed trade.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub side: Side,
    pub collection_address: Address,
    pub token_id: TokenId,
    pub address: Address,
    pub price: PriceWire,
    #[serde(default)]
    pub expiry: u64,
    #[serde(default)]
    pub nonce: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response to `GET /nft/trade/{collection}/{token_id}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TradesResponse {
    #[serde(default, alias = "entries")]
    pub trades: Vec<TradeEntry>,
}
