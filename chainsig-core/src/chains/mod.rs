// chainsig-core/src/chains/mod.rs
//
// Chains Module - address encoders cho các chain được hỗ trợ

pub mod bitcoin;
pub mod evm;

use crate::crypto::paths::coin_type;
use crate::crypto::public_key::ChildPublicKey;
use crate::error::ChainSigError;
use bitcoin::{BitcoinNetwork, BtcAddress};
use evm::EvmAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target chain của một derived address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    /// BNB Smart Chain, cùng address format với Ethereum
    Bnb,
    Bitcoin,
}

impl Chain {
    pub const ALL: [Chain; 3] = [Chain::Ethereum, Chain::Bnb, Chain::Bitcoin];

    /// SLIP-44 coin type (EVM chains dùng chung 60)
    pub const fn coin_type(self) -> u32 {
        match self {
            Chain::Ethereum | Chain::Bnb => coin_type::ETHEREUM,
            Chain::Bitcoin => coin_type::BITCOIN,
        }
    }

    pub const fn is_evm(self) -> bool {
        matches!(self, Chain::Ethereum | Chain::Bnb)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Bnb => "bnb",
            Chain::Bitcoin => "bitcoin",
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Bnb => "BNB",
            Chain::Bitcoin => "BTC",
        }
    }

    /// Encode a derived key as this chain's address.
    ///
    /// `btc_network` is ignored for EVM chains.
    pub fn encode_address(self, public_key: &ChildPublicKey, btc_network: BitcoinNetwork) -> String {
        match self {
            Chain::Ethereum | Chain::Bnb => EvmAddress::from_public_key(public_key),
            Chain::Bitcoin => BtcAddress::from_public_key(public_key, btc_network),
        }
    }

    /// Validate an address string against this chain's format.
    pub fn is_valid_address(self, address: &str) -> bool {
        match self {
            Chain::Ethereum | Chain::Bnb => EvmAddress::is_valid(address),
            Chain::Bitcoin => BtcAddress::is_valid(address),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = ChainSigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" | "eth" => Ok(Chain::Ethereum),
            "bnb" | "bsc" => Ok(Chain::Bnb),
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            other => Err(ChainSigError::Config(format!("Unsupported chain '{}'", other))),
        }
    }
}
