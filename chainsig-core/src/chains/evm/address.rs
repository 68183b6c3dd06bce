// chainsig-core/src/chains/evm/address.rs
//
// EVM Address Module - address từ derived public key
// Keccak-256, EIP-55 (Checksum), secp256k1

use crate::crypto::public_key::ChildPublicKey;
use crate::error::{ChainSigResult, DecodeError};
use alloy::primitives::Address;
use tiny_keccak::{Hasher, Keccak};

/// EVM Address Encoder
///
/// # Flow:  Public Key (X || Y, 64B) → Keccak256 → Address (20B)
///
/// Chỉ làm việc với public key: chain-signature keys không có private key local.
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address Bytes (20 bytes)
    // =========================================================================

    /// Derive the 20 address bytes from a raw `X || Y` public key.
    ///
    /// # Algorithm (chuẩn Ethereum Yellow Paper)
    /// 1. Keccak-256(`pub_key_raw`) → `hash` (32B), NOT SHA3-256
    /// 2. `hash[12..32]` → `address` (20B)
    pub fn derive_bytes(pub_key_xy: &[u8; 64]) -> [u8; 20] {
        let mut hasher = Keccak::v256();
        let mut hash = [0u8; 32];
        hasher.update(pub_key_xy);
        hasher.finalize(&mut hash);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        address
    }

    /// Lowercase `0x`-prefixed hex address (42 chars).
    #[inline]
    pub fn encode(pub_key_xy: &[u8; 64]) -> String {
        format!("0x{}", hex::encode(Self::derive_bytes(pub_key_xy)))
    }

    /// EIP-55 checksummed address from a raw `X || Y` public key.
    ///
    /// # Returns
    /// `"0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"` (mixed-case checksum)
    #[inline]
    pub fn encode_checksummed(pub_key_xy: &[u8; 64]) -> String {
        Address::from(Self::derive_bytes(pub_key_xy)).to_checksum(None)
    }

    /// Lowercase address of a derived child key.
    #[inline]
    pub fn from_public_key(public_key: &ChildPublicKey) -> String {
        Self::encode(&public_key.to_xy_bytes())
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải Ethereum address hợp lệ không
    ///
    /// Kiểm tra: `0x` prefix + 40 hex chars + EIP-55 checksum (nếu mixed case)
    #[inline]
    pub fn is_valid(address: &str) -> bool {
        address.parse::<Address>().is_ok()
    }

    /// Normalize về EIP-55 checksum format
    ///
    /// `"0xabcd..."` → `"0xAbCd..."` (mixed-case theo checksum)
    pub fn to_checksum(address: &str) -> ChainSigResult<String> {
        let addr: Address = address
            .parse()
            .map_err(|_| DecodeError::InvalidAddress(format!("'{}' is not an EVM address", address)))?;
        Ok(addr.to_checksum(None))
    }

    /// So sánh 2 address (case-insensitive, zero-allocation)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// Shorthand for [`EvmAddress::encode`].
#[inline]
pub fn to_evm_address(pub_key_xy: &[u8; 64]) -> String {
    EvmAddress::encode(pub_key_xy)
}

// =============================================================================
// TESTS
// =============================================================================
