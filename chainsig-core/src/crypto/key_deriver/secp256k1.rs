// chainsig-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Public Key Combiner - additive (non-hardened) derivation
//
//   child = root + epsilon · G
//
// Không cần private key: MPC network giữ share của root secret, và
// child secret tương ứng là root_secret + epsilon (mod n).

use crate::crypto::epsilon::Epsilon;
use crate::crypto::public_key::{ChildPublicKey, RootPublicKey};
use crate::error::ChainSigResult;
use k256::ProjectivePoint;

/// Public-key-only deriver for chain-signature child keys.
pub struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// Compute `root + epsilon * G`.
    ///
    /// # Errors
    /// [`CryptoError::InvalidPoint`](crate::error::CryptoError::InvalidPoint) if the
    /// sum is the point at infinity (epsilon equal to the negated root discrete log).
    pub fn derive_child_public_key(
        root: &RootPublicKey,
        epsilon: &Epsilon,
    ) -> ChainSigResult<ChildPublicKey> {
        let tweak = ProjectivePoint::GENERATOR * *epsilon.as_scalar();
        ChildPublicKey::from_projective(root.to_projective() + tweak)
    }

    /// Same as [`derive_child_public_key`](Self::derive_child_public_key), taking
    /// the root key in its `"secp256k1:<base58>"` text form.
    pub fn derive_from_encoded(
        encoded_root: &str,
        epsilon: &Epsilon,
    ) -> ChainSigResult<ChildPublicKey> {
        let root = RootPublicKey::parse(encoded_root)?;
        Self::derive_child_public_key(&root, epsilon)
    }
}

/// Shorthand for [`Secp256k1Deriver::derive_child_public_key`].
#[inline]
pub fn derive_child_public_key(
    root: &RootPublicKey,
    epsilon: &Epsilon,
) -> ChainSigResult<ChildPublicKey> {
    Secp256k1Deriver::derive_child_public_key(root, epsilon)
}

// =============================================================================
// TESTS
// =============================================================================
