// chainsig-core/src/api.rs
//
// Public API - entry points cho wallet layer
//
// - Sync helpers: caller đã có root key string
// - `ChainSigDeriver`: lấy root key qua `RootKeyProvider` rồi derive

use crate::chains::bitcoin::{BitcoinNetwork, BtcAddress};
use crate::chains::evm::EvmAddress;
use crate::chains::Chain;
use crate::config::ChainSigConfig;
use crate::crypto::key_deriver::{DerivedKey, KeyDeriver};
use crate::crypto::public_key::{ChildPublicKey, RootPublicKey};
use crate::error::{ChainSigError, ChainSigResult};
use crate::network::traits::{RootKeyProvider, StaticRootKeyProvider};
use serde::Serialize;

/// Address derived for `(signer_id, path)` on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAddress {
    pub chain: Chain,
    pub address: String,
    /// Uncompressed SEC1 hex của child key
    pub public_key: ChildPublicKey,
}

impl DerivedAddress {
    pub fn new(chain: Chain, public_key: ChildPublicKey, btc_network: BitcoinNetwork) -> Self {
        Self {
            chain,
            address: chain.encode_address(&public_key, btc_network),
            public_key,
        }
    }
}

// =============================================================================
// SYNC HELPERS
// =============================================================================

/// EVM address of `(signer_id, path)` under the encoded root key.
pub fn derive_evm_address(root_public_key: &str, signer_id: &str, path: &str) -> ChainSigResult<String> {
    let root = RootPublicKey::parse(root_public_key)?;
    let key = KeyDeriver::derive(&root, signer_id, path)?;
    Ok(EvmAddress::from_public_key(&key.public_key))
}

/// Bitcoin P2PKH address of `(signer_id, path)` under the encoded root key.
pub fn derive_btc_address(
    root_public_key: &str,
    signer_id: &str,
    path: &str,
    network: BitcoinNetwork,
) -> ChainSigResult<String> {
    let root = RootPublicKey::parse(root_public_key)?;
    let key = KeyDeriver::derive(&root, signer_id, path)?;
    Ok(BtcAddress::from_public_key(&key.public_key, network))
}

pub fn derive_address(
    root: &RootPublicKey,
    chain: Chain,
    signer_id: &str,
    path: &str,
    btc_network: BitcoinNetwork,
) -> ChainSigResult<DerivedAddress> {
    let key = KeyDeriver::derive(root, signer_id, path)?;
    Ok(DerivedAddress::new(chain, key.public_key, btc_network))
}

// =============================================================================
// DERIVER
// =============================================================================

/// Derivation service bound to a root-key source.
///
/// Root key được fetch mỗi lần gọi; provider tự quyết định cache.
pub struct ChainSigDeriver<P> {
    provider: P,
    btc_network: BitcoinNetwork,
}

impl<P: RootKeyProvider> ChainSigDeriver<P> {
    pub fn new(provider: P, btc_network: BitcoinNetwork) -> Self {
        Self {
            provider,
            btc_network,
        }
    }

    #[inline]
    pub fn btc_network(&self) -> BitcoinNetwork {
        self.btc_network
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn root_public_key(&self) -> ChainSigResult<RootPublicKey> {
        self.provider.root_public_key().await
    }

    pub async fn derive_key(&self, signer_id: &str, path: &str) -> ChainSigResult<DerivedKey> {
        let root = self.provider.root_public_key().await?;
        KeyDeriver::derive(&root, signer_id, path)
    }

    pub async fn derive_address(
        &self,
        chain: Chain,
        signer_id: &str,
        path: &str,
    ) -> ChainSigResult<DerivedAddress> {
        let key = self.derive_key(signer_id, path).await?;
        let derived = DerivedAddress::new(chain, key.public_key, self.btc_network);

        tracing::debug!(%chain, signer_id, path, address = %derived.address, "derived address");
        Ok(derived)
    }

    /// Derive one address per chain for the same `(signer_id, path)`.
    ///
    /// Root key chỉ fetch một lần.
    pub async fn derive_addresses(
        &self,
        chains: &[Chain],
        signer_id: &str,
        path: &str,
    ) -> ChainSigResult<Vec<DerivedAddress>> {
        let key = self.derive_key(signer_id, path).await?;
        Ok(chains
            .iter()
            .map(|&chain| DerivedAddress::new(chain, key.public_key, self.btc_network))
            .collect())
    }
}

impl ChainSigDeriver<StaticRootKeyProvider> {
    /// Deriver over the root key pinned in `config`.
    ///
    /// # Errors
    /// [`ChainSigError::Config`] nếu config không có `root_public_key`.
    pub fn from_config(config: &ChainSigConfig) -> ChainSigResult<Self> {
        let provider = config.root_key_provider().ok_or_else(|| {
            tracing::warn!(contract_id = %config.contract_id, "no root public key configured");
            ChainSigError::Config(format!(
                "root_public_key is not set; fetch it from '{}' first",
                config.contract_id
            ))
        })?;
        Ok(Self::new(provider, config.btc_network))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::paths::DerivationPaths;
    use crate::error::DecodeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ROOT_KEY: &str = "secp256k1:37aFybhUHCxRdDkuCcB3yHzxqK7N8EQ745MujyAQohXSsYymVeHzhLxKvZ2qYeRHf3pGFiAsxqFJZjpF9gP2JV5u";
    const FELIPE_ETH: &str = "0x4f1052f6bff65fbd57e28e15a820b844543c3e15";

    /// Đếm số lần root key bị fetch
    struct CountingProvider {
        root: RootPublicKey,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RootKeyProvider for CountingProvider {
        async fn root_public_key(&self) -> ChainSigResult<RootPublicKey> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.root)
        }
    }

    fn deriver(btc_network: BitcoinNetwork) -> ChainSigDeriver<StaticRootKeyProvider> {
        ChainSigDeriver::new(StaticRootKeyProvider::parse(ROOT_KEY).unwrap(), btc_network)
    }

    // ── Sync helpers ─────────────────────────────────────────────────

    #[test]
    fn test_derive_evm_address() {
        assert_eq!(
            derive_evm_address(ROOT_KEY, "felipe.near", DerivationPaths::ETHEREUM_NEAR_ORG).unwrap(),
            FELIPE_ETH
        );
        assert_eq!(
            derive_evm_address(ROOT_KEY, "alice.testnet", "ethereum-1").unwrap(),
            "0x320c8bd97237a4634bf72b79f9fbede79ce6a7e5"
        );
    }

    #[test]
    fn test_derive_btc_address() {
        assert_eq!(
            derive_btc_address(ROOT_KEY, "felipe.near", DerivationPaths::BITCOIN, BitcoinNetwork::Mainnet)
                .unwrap(),
            "14QMWuPfZB4HqKyGvg8j1sgrhuBumFX9YX"
        );
        assert_eq!(
            derive_btc_address(ROOT_KEY, "", "", BitcoinNetwork::Testnet).unwrap(),
            "msAxdtSKWDHkSUchYa8ixhHXLtYBs3inwZ"
        );
    }

    #[test]
    fn test_helpers_propagate_decode_errors() {
        assert_eq!(
            derive_evm_address("37aFyb", "felipe.near", ""),
            Err(DecodeError::MissingCurvePrefix("37aFyb".to_string()).into())
        );
        assert!(matches!(
            derive_btc_address("secp256k1:111", "a", "b", BitcoinNetwork::Mainnet),
            Err(ChainSigError::Decode(DecodeError::InvalidLength { expected: 64, .. }))
        ));
    }

    #[test]
    fn test_derived_address_json() {
        let root = RootPublicKey::parse(ROOT_KEY).unwrap();
        let derived = derive_address(
            &root,
            Chain::Ethereum,
            "felipe.near",
            DerivationPaths::ETHEREUM_NEAR_ORG,
            BitcoinNetwork::Mainnet,
        )
        .unwrap();

        let json = serde_json::to_value(&derived).unwrap();
        assert_eq!(json["chain"], "ethereum");
        assert_eq!(json["address"], FELIPE_ETH);
        let public_key = json["publicKey"].as_str().unwrap();
        assert_eq!(public_key.len(), 130);
        assert!(public_key.starts_with("04"));
    }

    // ── Async deriver ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_deriver_addresses() {
        let deriver = deriver(BitcoinNetwork::Testnet);
        let eth = deriver
            .derive_address(Chain::Ethereum, "felipe.near", DerivationPaths::ETHEREUM_NEAR_ORG)
            .await
            .unwrap();
        assert_eq!(eth.address, FELIPE_ETH);

        let btc = deriver
            .derive_address(Chain::Bitcoin, "felipe.near", DerivationPaths::ETHEREUM_NEAR_ORG)
            .await
            .unwrap();
        assert_eq!(btc.address, "n4WZvx85h2LJARHnEzacj4jMZ3aAiNyQpB");
        assert_eq!(btc.public_key, eth.public_key);
    }

    #[tokio::test]
    async fn test_derive_addresses_fetches_root_once() {
        let provider = CountingProvider {
            root: RootPublicKey::parse(ROOT_KEY).unwrap(),
            calls: AtomicUsize::new(0),
        };
        let deriver = ChainSigDeriver::new(provider, BitcoinNetwork::Mainnet);

        let addresses = deriver
            .derive_addresses(&Chain::ALL, "felipe.near", DerivationPaths::ETHEREUM_NEAR_ORG)
            .await
            .unwrap();

        assert_eq!(deriver.provider().calls.load(Ordering::SeqCst), 1);
        let found: Vec<&str> = addresses.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(
            found,
            vec![FELIPE_ETH, FELIPE_ETH, "1Pzcdu36szu3PJpAXRcEu9X2h3yTqoVSPe"]
        );
    }

    #[tokio::test]
    async fn test_deriver_key_matches_sync() {
        let deriver = deriver(BitcoinNetwork::Mainnet);
        let key = deriver.derive_key("alice.testnet", "ethereum-1").await.unwrap();
        let root = deriver.root_public_key().await.unwrap();
        assert_eq!(key, KeyDeriver::derive(&root, "alice.testnet", "ethereum-1").unwrap());
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = ChainSigConfig::mainnet()
            .with_root_public_key(RootPublicKey::parse(ROOT_KEY).unwrap());
        let deriver = ChainSigDeriver::from_config(&config).unwrap();
        assert_eq!(deriver.btc_network(), BitcoinNetwork::Mainnet);

        let btc = deriver
            .derive_address(Chain::Bitcoin, "felipe.near", DerivationPaths::BITCOIN)
            .await
            .unwrap();
        assert_eq!(btc.address, "14QMWuPfZB4HqKyGvg8j1sgrhuBumFX9YX");
    }

    #[test]
    fn test_from_config_without_root_key() {
        assert!(matches!(
            ChainSigDeriver::from_config(&ChainSigConfig::testnet()),
            Err(ChainSigError::Config(_))
        ));
    }
}
