// chainsig-core/src/lib.rs

//! Chain-signature key derivation.
//!
//! Derives the per-account child public key that an MPC signer network uses
//! for `(signer_id, path)` and encodes it as an EVM or Bitcoin address:
//!
//! ```text
//! epsilon = SHA-256("near-mpc-recovery v0.1.0 epsilon derivation:" || signer_id || "," || path)  (LE, mod n)
//! child   = root + epsilon * G
//! ```

pub mod api;
pub mod chains;
pub mod config;
pub mod crypto;
pub mod error;
pub mod network;

pub use api::{derive_address, derive_btc_address, derive_evm_address, ChainSigDeriver, DerivedAddress};
pub use chains::bitcoin::{to_btc_address, BitcoinNetwork, BtcAddress};
pub use chains::evm::{to_evm_address, EvmAddress};
pub use chains::Chain;
pub use config::{ChainSigConfig, NearNetwork};
pub use crypto::{
    derive_child_public_key, derive_epsilon, ChildPublicKey, DerivedKey, Epsilon, KeyDeriver,
    RootPublicKey,
};
pub use error::{ChainSigError, ChainSigResult, CryptoError, DecodeError};
pub use network::{RootKeyProvider, StaticRootKeyProvider};
