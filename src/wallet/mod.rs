//! Wallet capability — the injected signer a trade attempt delegates to.
//!
//! The SDK never holds key material. Browser extensions, hardware wallets and
//! CLI keystores all plug in by implementing [`WalletSigner`]; the trade flow
//! only sees the resulting [`WalletSignature`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::WalletError;
use crate::network::Network;
use crate::shared::Address;

/// Signature material returned by a wallet.
///
/// Both fields are opaque to the SDK and forwarded to the trading API as-is.
/// Wallet bridges report the key as either `publicKey` or `public_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSignature {
    pub signature: String,
    #[serde(alias = "public_key")]
    pub public_key: String,
}

/// A connected wallet able to sign arbitrary messages.
///
/// `sign` may suspend indefinitely while the user confirms on their device;
/// cancellation and timeouts are the caller's concern.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// The wallet's byte20 address.
    fn address(&self) -> Address;

    /// Sign `message`, or fail with [`WalletError::Rejected`] if the user declines.
    async fn sign(&self, message: &[u8]) -> Result<WalletSignature, WalletError>;
}

/// Read-only wallet/session context for one trade attempt.
#[derive(Clone, Default)]
pub struct WalletContext {
    pub wallet: Option<Arc<dyn WalletSigner>>,
    pub network: Network,
}

impl WalletContext {
    pub fn connected(wallet: Arc<dyn WalletSigner>, network: Network) -> Self {
        Self {
            wallet: Some(wallet),
            network,
        }
    }

    pub fn disconnected(network: Network) -> Self {
        Self {
            wallet: None,
            network,
        }
    }

    pub fn wallet(&self) -> Option<&dyn WalletSigner> {
        self.wallet.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }
}

impl std::fmt::Debug for WalletContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletContext")
            .field("wallet", &self.wallet.as_ref().map(|w| w.address()))
            .field("network", &self.network)
            .finish()
    }
}
