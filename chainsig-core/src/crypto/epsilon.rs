// chainsig-core/src/crypto/epsilon.rs
//
// Epsilon Derivation - additive tweak cho chain-signature child keys
//
//   epsilon = SHA-256("near-mpc-recovery v0.1.0 epsilon derivation:{signer_id},{path}")
//             đọc dạng little-endian integer, reduce mod n (secp256k1 order)
//
// MPC signer contract tính cùng công thức, nên byte order ở đây phải khớp tuyệt đối.

use k256::elliptic_curve::ops::Reduce;
use k256::{FieldBytes, Scalar, U256};
use sha2::{Digest, Sha256};
use std::ops::Add;

/// Domain separation prefix shared with the signer contract.
pub const EPSILON_DERIVATION_PREFIX: &str = "near-mpc-recovery v0.1.0 epsilon derivation:";

/// Per-(signer, path) tweak scalar in `[0, n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epsilon(Scalar);

impl Epsilon {
    /// Derive epsilon for `signer_id` and `path`.
    ///
    /// Total over all inputs; empty strings are valid.
    pub fn derive(signer_id: &str, path: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(EPSILON_DERIVATION_PREFIX.as_bytes());
        hasher.update(signer_id.as_bytes());
        hasher.update(b",");
        hasher.update(path.as_bytes());
        let digest: [u8; 32] = hasher.finalize().into();

        Self::from_le_bytes(&digest)
    }

    /// Interpret 32 bytes as a little-endian integer, reduced mod n.
    pub fn from_le_bytes(bytes: &[u8; 32]) -> Self {
        let mut be = *bytes;
        be.reverse();
        Self::from_be_bytes(&be)
    }

    /// Interpret 32 bytes as a big-endian integer, reduced mod n.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        Self(<Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*bytes)))
    }

    #[inline]
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    /// Big-endian scalar bytes.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes().into()
    }

    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl From<Scalar> for Epsilon {
    fn from(scalar: Scalar) -> Self {
        Self(scalar)
    }
}

impl Add for Epsilon {
    type Output = Epsilon;

    fn add(self, rhs: Epsilon) -> Epsilon {
        Epsilon(self.0 + rhs.0)
    }
}

/// Shorthand for [`Epsilon::derive`].
#[inline]
pub fn derive_epsilon(signer_id: &str, path: &str) -> Epsilon {
    Epsilon::derive(signer_id, path)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNER: &str = "felipe.near";
    const PATH: &str = ",ethereum,near.org";
    const FELIPE_EPSILON: &str =
        "f41a47f598a290a4850a83170ba75fcba70952b6ed1a0208008c78a72bd519a8";

    /// Hex digest, reverse từng cặp ký tự, parse big-endian.
    fn epsilon_via_hex_reversal(signer_id: &str, path: &str) -> Epsilon {
        let input = format!("{}{},{}", EPSILON_DERIVATION_PREFIX, signer_id, path);
        let digest_hex = hex::encode(Sha256::digest(input.as_bytes()));

        let pairs: Vec<&str> = (0..digest_hex.len())
            .step_by(2)
            .map(|i| &digest_hex[i..i + 2])
            .collect();
        let reversed: String = pairs.into_iter().rev().collect();

        let bytes: [u8; 32] = hex::decode(reversed).unwrap().try_into().unwrap();
        Epsilon::from_be_bytes(&bytes)
    }

    #[test]
    fn test_known_epsilon() {
        let epsilon = derive_epsilon(SIGNER, PATH);
        assert_eq!(epsilon.to_hex(), FELIPE_EPSILON);
    }

    #[test]
    fn test_deterministic() {
        let e1 = derive_epsilon(SIGNER, PATH);
        let e2 = derive_epsilon(SIGNER, PATH);
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_hex_reversal_equivalence() {
        let cases = [
            (SIGNER, PATH),
            (SIGNER, ",bitcoin,"),
            ("", ""),
            ("alice.testnet", "ethereum-1"),
            ("dev-1700000000000-123", ",,near.stage"),
            ("ünïcödé.near", "path/with/slashes"),
        ];
        for (signer, path) in cases {
            assert_eq!(
                derive_epsilon(signer, path),
                epsilon_via_hex_reversal(signer, path),
                "mismatch for ({:?}, {:?})",
                signer,
                path
            );
        }
    }

    #[test]
    fn test_empty_inputs_are_valid() {
        let epsilon = derive_epsilon("", "");
        assert_eq!(
            epsilon.to_hex(),
            "ca2faa398d6139fb1ffb81202a7699cb0602d64e2da3e72aa742a6efeddf6e8b"
        );
    }

    #[test]
    fn test_different_inputs_different_epsilon() {
        assert_ne!(derive_epsilon(SIGNER, PATH), derive_epsilon(SIGNER, ",bitcoin,"));
        assert_ne!(derive_epsilon(SIGNER, PATH), derive_epsilon("felipe.testnet", PATH));
    }

    #[test]
    fn test_derivation_string_is_plain_concatenation() {
        // Không escape dấu phẩy: hai input này hash ra cùng một chuỗi
        assert_eq!(derive_epsilon("a,b", "c"), derive_epsilon("a", "b,c"));
    }

    #[test]
    fn test_reduces_modulo_order() {
        let max = Epsilon::from_le_bytes(&[0xff; 32]);
        assert_eq!(
            max.to_hex(),
            "000000000000000000000000000000014551231950b75fc4402da1732fc9bebe"
        );

        let mut order_le =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
                .unwrap();
        order_le.reverse();
        let order: [u8; 32] = order_le.try_into().unwrap();
        assert_eq!(Epsilon::from_le_bytes(&order), Epsilon::from(Scalar::ZERO));
    }

    #[test]
    fn test_add() {
        let one = Epsilon::from(Scalar::ONE);
        let two = one + one;
        assert_eq!(two, Epsilon::from(Scalar::from(2u64)));
    }
}
