// chainsig-core/src/crypto/key_deriver/mod.rs
//
// Key Derivation Engine - chain-signature child keys
//
// Kiến trúc:
// ┌─────────────────────────────────────────────────┐
// │  (signer_id, path)          RootPublicKey       │
// │         │                        │              │
// │         ▼                        │              │
// │  SHA-256 → LE scalar (epsilon)   │              │
// │         │                        │              │
// │         └──────► root + ε·G ◄────┘              │
// │                      │                          │
// │                      ▼                          │
// │               ChildPublicKey                    │
// │               ├─ EVM (ETH, BNB...)              │
// │               └─ Bitcoin P2PKH                  │
// └─────────────────────────────────────────────────┘

pub mod secp256k1;

// Re-exports
pub use secp256k1::{derive_child_public_key, Secp256k1Deriver};

use crate::crypto::epsilon::Epsilon;
use crate::crypto::public_key::{ChildPublicKey, RootPublicKey};
use crate::error::ChainSigResult;

// =============================================================================
// COMMON TYPES
// =============================================================================

/// Kết quả derivation: child public key + input đã dùng
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKey {
    /// Account that owns the derived key (predecessor on the signer contract)
    pub signer_id: String,
    /// Derivation path
    pub path: String,
    /// Tweak applied to the root key
    pub epsilon: Epsilon,
    /// `root + epsilon * G`
    pub public_key: ChildPublicKey,
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================

/// Entry point: epsilon + combine trong một lần gọi.
pub struct KeyDeriver;

impl KeyDeriver {
    /// Derive the child key of `root` for `(signer_id, path)`.
    ///
    /// # Arguments
    /// * `root` - MPC root public key
    /// * `signer_id` - NEAR account id that will request signatures
    /// * `path` - Opaque derivation path (e.g. `",ethereum,near.org"`)
    pub fn derive(root: &RootPublicKey, signer_id: &str, path: &str) -> ChainSigResult<DerivedKey> {
        let epsilon = Epsilon::derive(signer_id, path);
        let public_key = Secp256k1Deriver::derive_child_public_key(root, &epsilon)?;

        tracing::debug!(signer_id, path, "derived chain-signature child key");

        Ok(DerivedKey {
            signer_id: signer_id.to_string(),
            path: path.to_string(),
            epsilon,
            public_key,
        })
    }

    /// Derive nhiều paths cho cùng một signer
    ///
    /// Output giữ nguyên thứ tự của `paths`.
    pub fn derive_batch<P: AsRef<str>>(
        root: &RootPublicKey,
        signer_id: &str,
        paths: &[P],
    ) -> ChainSigResult<Vec<DerivedKey>> {
        paths
            .iter()
            .map(|path| Self::derive(root, signer_id, path.as_ref()))
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
