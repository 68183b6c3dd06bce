// chainsig-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! Address encoding for Ethereum and EVM-compatible chains (BSC, Polygon, Arbitrum, Base, etc.)
//! from chain-signature derived public keys.
//!
//! # Key Features
//! - **Address Encoding**: Keccak-256 address, lowercase or EIP-55 checksummed, via [`EvmAddress`].

pub mod address;

// Re-exports for cleaner API access
pub use address::{to_evm_address, EvmAddress};
