//! Cheque derivation: the canonical hash of a trade order and the message
//! a wallet signs over it.
//!
//! The cheque is the SHA-256 of a concatenation of per-field SHA-256
//! digests (hex), so each field is hashed in isolation and no two field
//! layouts can collide:
//!
//! | segment | contents                                        |
//! |---------|-------------------------------------------------|
//! | 0       | `{broker_tag}.{side}`                           |
//! | 1       | `{collection}.{token_id}`                       |
//! | 2       | `{currency}.{amount}`                           |
//! | 3       | fee amount                                      |
//! | 4       | expiry                                          |
//! | 5       | nonce, 16-byte big-endian (hex, not hashed)     |
//!
//! Addresses are lowercased and decimals normalized before hashing so that
//! `0xABC` / `0xabc` and `250` / `250.00` sign identically.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::domain::trade::TradeOrder;

/// Action a cheque message authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Execute the trade.
    Execute,
    /// Void a previously signed cheque.
    Void,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Execute => "Execute",
            Self::Void => "Void",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn decimal_str(value: &Decimal) -> String {
    value.normalize().to_string()
}

/// Compute the cheque hash (lowercase hex) of `order` under `broker_tag`.
pub fn cheque_hash(broker_tag: &str, order: &TradeOrder) -> String {
    let mut buffer = String::with_capacity(6 * 64);

    buffer.push_str(&sha256_hex(
        format!("{}.{}", broker_tag, order.side.as_str()).as_bytes(),
    ));
    buffer.push_str(&sha256_hex(
        format!(
            "{}.{}",
            order.token.collection_address.normalized(),
            order.token.token_id.as_str().trim()
        )
        .as_bytes(),
    ));
    buffer.push_str(&sha256_hex(
        format!(
            "{}.{}",
            order.price.currency_address.normalized(),
            decimal_str(&order.price.amount)
        )
        .as_bytes(),
    ));
    buffer.push_str(&sha256_hex(decimal_str(&order.fee_amount).as_bytes()));
    buffer.push_str(&sha256_hex(order.expiry.to_string().as_bytes()));
    buffer.push_str(&hex::encode((order.nonce as u128).to_be_bytes()));

    sha256_hex(buffer.as_bytes())
}

/// The human-readable message a wallet is asked to sign.
pub fn cheque_message(kind: MessageKind, cheque_hash: &str) -> String {
    format!("Ark Signed {} Message:\n{}", kind, cheque_hash)
}

/// Convenience: the `Execute` message for `order`, as bytes ready for a wallet.
pub fn execute_message(broker_tag: &str, order: &TradeOrder) -> Vec<u8> {
    cheque_message(MessageKind::Execute, &cheque_hash(broker_tag, order)).into_bytes()
}
