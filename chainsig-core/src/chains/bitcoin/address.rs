// chainsig-core/src/chains/bitcoin/address.rs
//
// Bitcoin Address Module - P2PKH từ derived public key
//
//   address = Base58Check(version || RIPEMD-160(SHA-256(pubkey)))
//   version: 0x00 mainnet ("1..."), 0x6f testnet ("m..." / "n...")

use crate::crypto::public_key::ChildPublicKey;
use crate::error::{ChainSigError, ChainSigResult, DecodeError};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Base58Check payload: 1 version byte + 20 byte HASH160
const P2PKH_PAYLOAD_LEN: usize = 21;

/// Bitcoin network, chọn version byte cho P2PKH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitcoinNetwork {
    #[default]
    Mainnet,
    Testnet,
}

impl BitcoinNetwork {
    #[inline]
    pub const fn p2pkh_version(self) -> u8 {
        match self {
            BitcoinNetwork::Mainnet => 0x00,
            BitcoinNetwork::Testnet => 0x6f,
        }
    }

    #[inline]
    pub const fn from_p2pkh_version(version: u8) -> Option<Self> {
        match version {
            0x00 => Some(BitcoinNetwork::Mainnet),
            0x6f => Some(BitcoinNetwork::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for BitcoinNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitcoinNetwork::Mainnet => f.write_str("mainnet"),
            BitcoinNetwork::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for BitcoinNetwork {
    type Err = ChainSigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(BitcoinNetwork::Mainnet),
            "testnet" => Ok(BitcoinNetwork::Testnet),
            other => Err(ChainSigError::Config(format!(
                "Bitcoin network must be either \"mainnet\" or \"testnet\", got \"{}\"",
                other
            ))),
        }
    }
}

/// Bitcoin P2PKH Address Encoder
///
/// # Flow:  Public Key (SEC1) → SHA-256 → RIPEMD-160 → version || hash → Base58Check
///
/// Default input là uncompressed SEC1 (`0x04 || X || Y`), giống MPC signer;
/// biến thể compressed cho ví chỉ nhận compressed keys.
pub struct BtcAddress;

impl BtcAddress {
    /// HASH160 = RIPEMD-160(SHA-256(data))
    pub fn hash160(data: &[u8]) -> [u8; 20] {
        let sha = Sha256::digest(data);
        Ripemd160::digest(sha).into()
    }

    /// Base58Check of `version || hash160`.
    pub fn encode_hash160(hash160: &[u8; 20], network: BitcoinNetwork) -> String {
        let mut payload = [0u8; P2PKH_PAYLOAD_LEN];
        payload[0] = network.p2pkh_version();
        payload[1..].copy_from_slice(hash160);
        bs58::encode(payload).with_check().into_string()
    }

    /// P2PKH address of an uncompressed public key given as raw `X || Y`.
    ///
    /// The `0x04` SEC1 marker is part of the hashed bytes; hashing bare `X || Y`
    /// gives an address no wallet can spend from.
    pub fn encode(pub_key_xy: &[u8; 64], network: BitcoinNetwork) -> String {
        let mut sec1 = [0u8; 65];
        sec1[0] = 0x04;
        sec1[1..].copy_from_slice(pub_key_xy);
        Self::encode_hash160(&Self::hash160(&sec1), network)
    }

    /// P2PKH address of a compressed SEC1 public key (33 bytes).
    pub fn encode_compressed(compressed: &[u8; 33], network: BitcoinNetwork) -> String {
        Self::encode_hash160(&Self::hash160(compressed), network)
    }

    #[inline]
    pub fn from_public_key(public_key: &ChildPublicKey, network: BitcoinNetwork) -> String {
        Self::encode(&public_key.to_xy_bytes(), network)
    }

    #[inline]
    pub fn from_public_key_compressed(
        public_key: &ChildPublicKey,
        network: BitcoinNetwork,
    ) -> String {
        Self::encode_compressed(&public_key.to_compressed(), network)
    }

    // =========================================================================
    // DECODING / VALIDATION
    // =========================================================================

    /// Decode a P2PKH address into its network and HASH160.
    ///
    /// Verifies the 4-byte double-SHA-256 checksum and the payload length.
    pub fn decode(address: &str) -> ChainSigResult<(BitcoinNetwork, [u8; 20])> {
        let payload = bs58::decode(address)
            .with_check(None)
            .into_vec()
            .map_err(|e| DecodeError::Base58(e.to_string()))?;

        if payload.len() != P2PKH_PAYLOAD_LEN {
            return Err(DecodeError::InvalidLength {
                expected: P2PKH_PAYLOAD_LEN,
                actual: payload.len(),
            }
            .into());
        }

        let network = BitcoinNetwork::from_p2pkh_version(payload[0]).ok_or_else(|| {
            DecodeError::InvalidAddress(format!(
                "unknown P2PKH version byte 0x{:02x}",
                payload[0]
            ))
        })?;

        let mut hash = [0u8; 20];
        hash.copy_from_slice(&payload[1..]);
        Ok((network, hash))
    }

    #[inline]
    pub fn is_valid(address: &str) -> bool {
        Self::decode(address).is_ok()
    }
}

/// Shorthand for [`BtcAddress::encode`].
#[inline]
pub fn to_btc_address(pub_key_xy: &[u8; 64], network: BitcoinNetwork) -> String {
    BtcAddress::encode(pub_key_xy, network)
}

// =============================================================================
// TESTS
// =============================================================================
