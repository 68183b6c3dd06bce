// chainsig-core/src/crypto/public_key.rs
//
// secp256k1 Public Keys - root key của MPC network và child key đã derive
//
// Text format của root key (trả về từ view method `public_key` của contract):
//   "secp256k1:<base58(X || Y)>"   X, Y mỗi cái 32 bytes big-endian

use crate::error::{ChainSigError, ChainSigResult, CryptoError, DecodeError};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, PublicKey};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Curve tag dùng trong NEAR public key strings
pub const SECP256K1_CURVE_PREFIX: &str = "secp256k1";

/// SEC1 uncompressed point marker
const UNCOMPRESSED_TAG: u8 = 0x04;

// =============================================================================
// ROOT PUBLIC KEY
// =============================================================================

/// Root public key of the chain-signature MPC network.
///
/// Always a valid point on secp256k1; parsing rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootPublicKey(PublicKey);

impl RootPublicKey {
    /// Parse `"secp256k1:<base58>"`.
    ///
    /// # Errors
    /// - [`DecodeError`] if the prefix is missing or not secp256k1, the base58
    ///   payload is malformed, or it does not decode to exactly 64 bytes.
    /// - [`CryptoError::InvalidPoint`] if the bytes are not a curve point.
    pub fn parse(encoded: &str) -> ChainSigResult<Self> {
        let (curve, payload) = encoded
            .split_once(':')
            .ok_or_else(|| DecodeError::MissingCurvePrefix(encoded.to_string()))?;

        if curve != SECP256K1_CURVE_PREFIX {
            return Err(DecodeError::UnsupportedCurve(curve.to_string()).into());
        }

        let bytes = bs58::decode(payload)
            .into_vec()
            .map_err(|e| DecodeError::Base58(e.to_string()))?;

        Self::from_xy_slice(&bytes)
    }

    /// Build from raw `X || Y` bytes of any length, checking it is 64.
    pub fn from_xy_slice(xy: &[u8]) -> ChainSigResult<Self> {
        let xy: &[u8; 64] = xy.try_into().map_err(|_| DecodeError::InvalidLength {
            expected: 64,
            actual: xy.len(),
        })?;
        Self::from_xy(xy)
    }

    pub fn from_xy(xy: &[u8; 64]) -> ChainSigResult<Self> {
        public_key_from_xy(xy).map(Self)
    }

    #[inline]
    pub fn as_public_key(&self) -> &PublicKey {
        &self.0
    }

    #[inline]
    pub fn to_projective(&self) -> ProjectivePoint {
        self.0.to_projective()
    }

    /// Raw `X || Y` (64 bytes).
    #[inline]
    pub fn to_xy_bytes(&self) -> [u8; 64] {
        xy_bytes(&self.0)
    }

    /// SEC1 uncompressed `0x04 || X || Y` (65 bytes).
    #[inline]
    pub fn to_uncompressed(&self) -> [u8; 65] {
        uncompressed_bytes(&self.0)
    }
}

impl fmt::Display for RootPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            SECP256K1_CURVE_PREFIX,
            bs58::encode(self.to_xy_bytes()).into_string()
        )
    }
}

impl FromStr for RootPublicKey {
    type Err = ChainSigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RootPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RootPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::parse(&encoded).map_err(de::Error::custom)
    }
}

// =============================================================================
// CHILD PUBLIC KEY
// =============================================================================

/// Derived public key `root + epsilon * G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildPublicKey(PublicKey);

impl ChildPublicKey {
    /// Identity point không phải public key hợp lệ → InvalidPoint
    pub(crate) fn from_projective(point: ProjectivePoint) -> ChainSigResult<Self> {
        PublicKey::from_affine(point.to_affine())
            .map(Self)
            .map_err(|_| {
                CryptoError::InvalidPoint("derived point is the point at infinity".to_string())
                    .into()
            })
    }

    #[inline]
    pub fn as_public_key(&self) -> &PublicKey {
        &self.0
    }

    /// Raw `X || Y` (64 bytes), the input of both address encoders.
    #[inline]
    pub fn to_xy_bytes(&self) -> [u8; 64] {
        xy_bytes(&self.0)
    }

    /// SEC1 uncompressed `0x04 || X || Y` (65 bytes).
    #[inline]
    pub fn to_uncompressed(&self) -> [u8; 65] {
        uncompressed_bytes(&self.0)
    }

    /// SEC1 compressed `0x02|0x03 || X` (33 bytes).
    pub fn to_compressed(&self) -> [u8; 33] {
        let encoded = self.0.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// Uncompressed hex, `"04..."` (130 chars).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_uncompressed())
    }
}

impl fmt::Display for ChildPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<ChildPublicKey> for RootPublicKey {
    fn from(child: ChildPublicKey) -> Self {
        RootPublicKey(child.0)
    }
}

impl Serialize for ChildPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn public_key_from_xy(xy: &[u8; 64]) -> ChainSigResult<PublicKey> {
    let mut sec1 = [0u8; 65];
    sec1[0] = UNCOMPRESSED_TAG;
    sec1[1..].copy_from_slice(xy);

    PublicKey::from_sec1_bytes(&sec1).map_err(|_| {
        CryptoError::InvalidPoint(format!("0x04{} is not on secp256k1", hex::encode(xy))).into()
    })
}

fn uncompressed_bytes(key: &PublicKey) -> [u8; 65] {
    let encoded = key.to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(encoded.as_bytes());
    out
}

fn xy_bytes(key: &PublicKey) -> [u8; 64] {
    let uncompressed = uncompressed_bytes(key);
    let mut out = [0u8; 64];
    out.copy_from_slice(&uncompressed[1..]);
    out
}

// =============================================================================
// TESTS
// =============================================================================
