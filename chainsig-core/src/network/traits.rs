// chainsig-core/src/network/traits.rs
//
// Root Key Provider - nguồn của MPC root public key
//
// Root key do signer contract công bố. Implement trait này trên transport
// của app (JSON-RPC, cache, fixture...) để `ChainSigDeriver` lấy key.

use crate::crypto::public_key::RootPublicKey;
use crate::error::ChainSigResult;
use async_trait::async_trait;
use std::sync::Arc;

/// RootKeyProvider - async source of the MPC root public key
#[async_trait]
pub trait RootKeyProvider: Send + Sync {
    /// Fetch the current root public key.
    ///
    /// Transport failures map to [`crate::error::ChainSigError::Provider`].
    async fn root_public_key(&self) -> ChainSigResult<RootPublicKey>;
}

/// Provider trả về một key cố định (config, test fixtures)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRootKeyProvider(RootPublicKey);

impl StaticRootKeyProvider {
    pub fn new(root: RootPublicKey) -> Self {
        Self(root)
    }

    pub fn parse(encoded: &str) -> ChainSigResult<Self> {
        RootPublicKey::parse(encoded).map(Self)
    }
}

#[async_trait]
impl RootKeyProvider for StaticRootKeyProvider {
    async fn root_public_key(&self) -> ChainSigResult<RootPublicKey> {
        Ok(self.0)
    }
}

#[async_trait]
impl<T: RootKeyProvider + ?Sized> RootKeyProvider for Arc<T> {
    async fn root_public_key(&self) -> ChainSigResult<RootPublicKey> {
        (**self).root_public_key().await
    }
}
