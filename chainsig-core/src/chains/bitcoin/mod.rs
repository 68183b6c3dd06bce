// chainsig-core/src/chains/bitcoin/mod.rs

//! Bitcoin Chain Support
//!
//! Legacy P2PKH address encoding (HASH160 + Base58Check) from chain-signature
//! derived public keys, for mainnet and testnet.

pub mod address;

// Re-exports for cleaner API access
pub use address::{to_btc_address, BitcoinNetwork, BtcAddress};
