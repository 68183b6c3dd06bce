// chainsig-core/src/network/mod.rs
//
// Network Module - boundary với signer contract
//
// Cung cấp:
// - Models: typed request/response cho view call `public_key`
// - Traits: `RootKeyProvider` cho transport do caller sở hữu

pub mod models;
pub mod traits;

// Re-export cho convenience
pub use models::*;
pub use traits::*;
