// chainsig-core/src/crypto/paths.rs
//
// Derivation Paths Module - chain-signature key paths
//
// Signer contract coi `path` là chuỗi opaque. Các app build chuỗi đó theo 3 kiểu:
// - Legacy:     ",{asset},{domain}"                       (e.g. ",ethereum,near.org")
// - Canonical:  JSON canonicalized của {chain, domain, meta: {path}}
// - Borsh:      base64(borsh({asset, domain}))

use crate::error::{ChainSigResult, DecodeError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    pub const ETHEREUM: u32 = 60; // EVM chains dùng chung coin_type 60
}

// =============================================================================
// CANONICAL KEY DERIVATION PATH
// =============================================================================

/// Structured path, serialized to canonical JSON before hashing.
///
/// Field order is alphabetical so serde output equals the canonical
/// (sorted-key, no-whitespace) form; `None` fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationPath {
    /// SLIP-44 coin type (dùng constants từ `coin_type::*`)
    pub chain: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<PathMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMeta {
    pub path: String,
}

impl KeyDerivationPath {
    /// Path with an empty domain and `meta.path = path`.
    pub fn new(chain: u32, path: impl Into<String>) -> Self {
        Self {
            chain,
            domain: Some(String::new()),
            meta: Some(PathMeta { path: path.into() }),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// `{"chain":60,"domain":"","meta":{"path":"..."}}`
    pub fn canonicalize(&self) -> ChainSigResult<String> {
        serde_json::to_string(self).map_err(|e| DecodeError::Serialization(e.to_string()).into())
    }
}

// =============================================================================
// BORSH KEY PATH
// =============================================================================

/// `{ asset, domain }` key path, borsh-encoded then base64.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct BorshKeyPath {
    pub asset: String,
    pub domain: String,
}

impl BorshKeyPath {
    pub fn new(asset: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            domain: domain.into(),
        }
    }

    pub fn to_base64(&self) -> ChainSigResult<String> {
        let bytes = borsh::to_vec(self).map_err(|e| DecodeError::Serialization(e.to_string()))?;
        Ok(BASE64.encode(bytes))
    }
}

// =============================================================================
// PRE-BUILT PATHS
// =============================================================================
pub struct DerivationPaths;

impl DerivationPaths {
    pub const ETHEREUM_NEAR_ORG: &'static str = ",ethereum,near.org";
    pub const BITCOIN: &'static str = ",bitcoin,";
    pub const NEAR_STAGE: &'static str = ",,near.stage";
    pub const EMPTY: &'static str = ",,";

    /// Legacy comma path `",{asset},{domain}"`
    #[inline]
    pub fn legacy(asset: &str, domain: &str) -> String {
        format!(",{},{}", asset, domain)
    }

    /// Canonical JSON cho EVM chains (coin type 60)
    #[inline]
    pub fn evm(path: &str) -> ChainSigResult<String> {
        KeyDerivationPath::new(coin_type::ETHEREUM, path).canonicalize()
    }

    /// Canonical JSON cho Bitcoin (coin type 0)
    #[inline]
    pub fn bitcoin(path: &str) -> ChainSigResult<String> {
        KeyDerivationPath::new(coin_type::BITCOIN, path).canonicalize()
    }
}

// =============================================================================
// TESTS
// =============================================================================
