// chainsig-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! Deterministic child-key derivation for chain signatures:
//!
//! - **Epsilon**: `(signer_id, path)` → tweak scalar via [`Epsilon`].
//! - **Public Keys**: root key parsing and child key encodings via [`RootPublicKey`] / [`ChildPublicKey`].
//! - **Key Derivation**: `root + epsilon * G` via [`KeyDeriver`] / [`Secp256k1Deriver`].
//! - **Derivation Paths**: legacy, canonical JSON and borsh path builders via [`DerivationPaths`].

pub mod epsilon;
pub mod key_deriver;
pub mod paths;
pub mod public_key;

// Re-exports for cleaner API access
pub use epsilon::{derive_epsilon, Epsilon, EPSILON_DERIVATION_PREFIX};
pub use key_deriver::{derive_child_public_key, DerivedKey, KeyDeriver, Secp256k1Deriver};
pub use paths::{BorshKeyPath, DerivationPaths, KeyDerivationPath, PathMeta};
pub use public_key::{ChildPublicKey, RootPublicKey, SECP256K1_CURVE_PREFIX};
