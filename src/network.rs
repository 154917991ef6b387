//! Network selection and URL constants for the Ark SDK.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default REST API base URL (mainnet).
pub const DEFAULT_API_URL: &str = "https://api-ark.zilswap.org";

/// REST API base URL for testnet.
pub const TESTNET_API_URL: &str = "https://test-api-ark.zilswap.org";

/// Zilliqa network a client or wallet is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }

    /// Default REST API base URL for this network.
    pub fn api_url(&self) -> &'static str {
        match self {
            Self::Mainnet => DEFAULT_API_URL,
            Self::Testnet => TESTNET_API_URL,
        }
    }

    /// Domain tag mixed into every cheque hash.
    pub fn broker_tag(&self) -> &'static str {
        match self {
            Self::Mainnet => "ark:mainnet",
            Self::Testnet => "ark:testnet",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}
