//! Conversions between trade domain types and wire types.

use super::wire::{PostTradeRequest, PostTradeResponse, PriceWire, TradeEntry};
use super::{Price, SignedSubmission, Trade, TokenRef, TradeResult};
use crate::error::TradeError;

impl From<&Price> for PriceWire {
    fn from(price: &Price) -> Self {
        PriceWire {
            amount: price.amount,
            address: price.currency_address.clone(),
        }
    }
}

impl From<PriceWire> for Price {
    fn from(wire: PriceWire) -> Self {
        Price {
            amount: wire.amount,
            currency_address: wire.address,
        }
    }
}

impl From<&SignedSubmission> for PostTradeRequest {
    fn from(signed: &SignedSubmission) -> Self {
        let order = &signed.order;
        PostTradeRequest {
            public_key: signed.public_key.clone(),
            signature: signed.signature.clone(),
            address: signed.address.normalized(),
            collection_address: order.token.collection_address.clone(),
            token_id: order.token.token_id.clone(),
            side: order.side,
            price: PriceWire::from(&order.price),
            fee_amount: order.fee_amount,
            expiry: order.expiry,
            nonce: order.nonce,
        }
    }
}

impl TryFrom<PostTradeResponse> for TradeResult {
    type Error = TradeError;

    /// A 2xx body can still report `"status": "error"`; that is a failed submission.
    fn try_from(resp: PostTradeResponse) -> Result<Self, Self::Error> {
        if let Some(status) = resp.status.as_deref() {
            if status.eq_ignore_ascii_case("error") {
                return Err(TradeError::SubmissionFailed {
                    status: None,
                    message: resp.message.unwrap_or_else(|| status.to_string()),
                });
            }
        }

        let mut data = resp.rest;
        if let Some(message) = resp.message {
            data.insert("message".to_string(), serde_json::Value::String(message));
        }
        Ok(TradeResult {
            status: resp.status,
            data,
        })
    }
}

impl From<TradeEntry> for Trade {
    fn from(entry: TradeEntry) -> Self {
        Trade {
            id: entry.id,
            side: entry.side,
            token: TokenRef {
                collection_address: entry.collection_address,
                token_id: entry.token_id,
            },
            address: entry.address,
            price: entry.price.into(),
            expiry: entry.expiry,
            nonce: entry.nonce,
            status: entry.status,
            created_at: entry.created_at,
        }
    }
}
