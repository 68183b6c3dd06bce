// chainsig-core/src/config.rs
//
// Configuration - network, signer contract và root key
//
// Nguồn (ưu tiên giảm dần): giá trị set tường minh → env / `.env` → preset theo network.

use crate::chains::bitcoin::BitcoinNetwork;
use crate::crypto::public_key::RootPublicKey;
use crate::error::{ChainSigError, ChainSigResult};
use crate::network::traits::StaticRootKeyProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const ENV_NEAR_NETWORK: &str = "NEAR_NETWORK_ID";
pub const ENV_CONTRACT_ID: &str = "CHAIN_SIGNATURE_CONTRACT";
pub const ENV_BTC_NETWORK: &str = "BTC_NETWORK_ID";
pub const ENV_ROOT_PUBLIC_KEY: &str = "MPC_ROOT_PUBLIC_KEY";

/// Tên biến của web app cũ, đọc khi tên chính không được set
pub const ENV_NEAR_NETWORK_FALLBACK: &str = "NEXT_PUBLIC_NEAR_NETWORK_ID";
pub const ENV_CONTRACT_ID_FALLBACK: &str = "NEXT_PUBLIC_CHAIN_SIGNATURE_CONTRACT";

pub const TESTNET_CONTRACT_ID: &str = "v1.signer-prod.testnet";
pub const MAINNET_CONTRACT_ID: &str = "v1.signer";

// =============================================================================
// NEAR NETWORK
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NearNetwork {
    Mainnet,
    #[default]
    Testnet,
}

impl NearNetwork {
    /// Signer contract được deploy trên network này
    pub const fn default_contract_id(self) -> &'static str {
        match self {
            NearNetwork::Mainnet => MAINNET_CONTRACT_ID,
            NearNetwork::Testnet => TESTNET_CONTRACT_ID,
        }
    }

    /// Bitcoin network đi kèm mặc định
    pub const fn default_btc_network(self) -> BitcoinNetwork {
        match self {
            NearNetwork::Mainnet => BitcoinNetwork::Mainnet,
            NearNetwork::Testnet => BitcoinNetwork::Testnet,
        }
    }
}

impl fmt::Display for NearNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NearNetwork::Mainnet => f.write_str("mainnet"),
            NearNetwork::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for NearNetwork {
    type Err = ChainSigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(NearNetwork::Mainnet),
            "testnet" => Ok(NearNetwork::Testnet),
            other => Err(ChainSigError::Config(format!(
                "NEAR network must be either \"mainnet\" or \"testnet\", got \"{}\"",
                other
            ))),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Resolved configuration.
///
/// Deserializing goes through the same preset fallback and [`ChainSigConfig::validate`]
/// as the loaders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PartialConfig")]
pub struct ChainSigConfig {
    pub near_network: NearNetwork,
    /// Account id of the chain-signature signer contract
    pub contract_id: String,
    pub btc_network: BitcoinNetwork,
    /// Pinned root key; `None` nghĩa là caller phải fetch từ contract
    pub root_public_key: Option<RootPublicKey>,
}

/// Partially specified config, tất cả fields optional
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    near_network: Option<NearNetwork>,
    contract_id: Option<String>,
    btc_network: Option<BitcoinNetwork>,
    root_public_key: Option<RootPublicKey>,
}

impl PartialConfig {
    fn resolve(self) -> ChainSigResult<ChainSigConfig> {
        let mut config = ChainSigConfig::for_network(self.near_network.unwrap_or_default());
        if let Some(contract_id) = self.contract_id {
            config.contract_id = contract_id;
        }
        if let Some(btc_network) = self.btc_network {
            config.btc_network = btc_network;
        }
        config.root_public_key = self.root_public_key;
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<PartialConfig> for ChainSigConfig {
    type Error = ChainSigError;

    fn try_from(partial: PartialConfig) -> Result<Self, Self::Error> {
        partial.resolve()
    }
}

impl Default for ChainSigConfig {
    fn default() -> Self {
        Self::testnet()
    }
}

impl ChainSigConfig {
    pub fn for_network(near_network: NearNetwork) -> Self {
        Self {
            near_network,
            contract_id: near_network.default_contract_id().to_string(),
            btc_network: near_network.default_btc_network(),
            root_public_key: None,
        }
    }

    pub fn testnet() -> Self {
        Self::for_network(NearNetwork::Testnet)
    }

    pub fn mainnet() -> Self {
        Self::for_network(NearNetwork::Mainnet)
    }

    pub fn with_contract_id(mut self, contract_id: impl Into<String>) -> Self {
        self.contract_id = contract_id.into();
        self
    }

    pub fn with_btc_network(mut self, btc_network: BitcoinNetwork) -> Self {
        self.btc_network = btc_network;
        self
    }

    pub fn with_root_public_key(mut self, root: RootPublicKey) -> Self {
        self.root_public_key = Some(root);
        self
    }

    // =========================================================================
    // LOADING
    // =========================================================================

    /// Parse TOML; missing fields fall back to the preset of `near_network`.
    ///
    /// ```toml
    /// near_network = "mainnet"
    /// btc_network = "mainnet"
    /// root_public_key = "secp256k1:..."
    /// ```
    pub fn from_toml_str(content: &str) -> ChainSigResult<Self> {
        toml::from_str(content).map_err(|e| {
            tracing::warn!(error = %e, "rejected chain-signature config file");
            ChainSigError::Config(format!("Failed to parse config as TOML: {}", e))
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ChainSigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ChainSigError::Config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from process env after reading `.env` if present.
    ///
    /// Reads `NEAR_NETWORK_ID`, `CHAIN_SIGNATURE_CONTRACT`, `BTC_NETWORK_ID`
    /// and `MPC_ROOT_PUBLIC_KEY`. `NEXT_PUBLIC_NEAR_NETWORK_ID` and
    /// `NEXT_PUBLIC_CHAIN_SIGNATURE_CONTRACT` are accepted when the first two
    /// are unset, so an existing web-app `.env` loads unchanged.
    pub fn from_env() -> ChainSigResult<Self> {
        // .env là optional
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> ChainSigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let var_or = |key: &str, fallback: &str| var(key).or_else(|| var(fallback));

        let partial = PartialConfig {
            near_network: var_or(ENV_NEAR_NETWORK, ENV_NEAR_NETWORK_FALLBACK)
                .map(|v| v.trim().parse::<NearNetwork>())
                .transpose()
                .map_err(|e| warn_rejected(ENV_NEAR_NETWORK, e))?,
            contract_id: var_or(ENV_CONTRACT_ID, ENV_CONTRACT_ID_FALLBACK)
                .map(|v| v.trim().to_string()),
            btc_network: var(ENV_BTC_NETWORK)
                .map(|v| v.trim().parse::<BitcoinNetwork>())
                .transpose()
                .map_err(|e| warn_rejected(ENV_BTC_NETWORK, e))?,
            root_public_key: var(ENV_ROOT_PUBLIC_KEY)
                .map(|v| RootPublicKey::parse(v.trim()))
                .transpose()
                .map_err(|e| warn_rejected(ENV_ROOT_PUBLIC_KEY, e))?,
        };
        partial.resolve()
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    pub fn validate(&self) -> ChainSigResult<()> {
        if !is_valid_account_id(&self.contract_id) {
            tracing::warn!(contract_id = %self.contract_id, "rejected signer contract id");
            return Err(ChainSigError::Config(format!(
                "'{}' is not a valid NEAR account id",
                self.contract_id
            )));
        }

        if self.btc_network != self.near_network.default_btc_network() {
            tracing::warn!(
                near_network = %self.near_network,
                btc_network = %self.btc_network,
                "Bitcoin network differs from NEAR network"
            );
        }

        Ok(())
    }

    /// Provider for the pinned root key, if one is configured.
    pub fn root_key_provider(&self) -> Option<StaticRootKeyProvider> {
        self.root_public_key.map(StaticRootKeyProvider::new)
    }
}

fn warn_rejected(key: &str, error: ChainSigError) -> ChainSigError {
    tracing::warn!(key, error = %error, "rejected environment variable");
    match error {
        ChainSigError::Config(_) => error,
        other => ChainSigError::Config(format!("{}: {}", key, other)),
    }
}

/// NEAR account id: 2-64 chars, `[a-z0-9]` parts joined by `-`, `_` or `.`.
fn is_valid_account_id(account_id: &str) -> bool {
    if !(2..=64).contains(&account_id.len()) {
        return false;
    }

    let mut last_was_separator = true;
    for c in account_id.chars() {
        match c {
            'a'..='z' | '0'..='9' => last_was_separator = false,
            '-' | '_' | '.' => {
                if last_was_separator {
                    return false;
                }
                last_was_separator = true;
            }
            _ => return false,
        }
    }
    !last_was_separator
}

// =============================================================================
// TESTS
// =============================================================================
