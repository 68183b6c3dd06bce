use thiserror::Error;

pub type ChainSigResult<T> = std::result::Result<T, ChainSigError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainSigError {
    #[error("Decode Error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Provider Error: {0}")]
    Provider(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Missing curve prefix in key '{0}', expected 'secp256k1:<base58>'")]
    MissingCurvePrefix(String),

    #[error("Unsupported curve '{0}', only secp256k1 keys can be derived")]
    UnsupportedCurve(String),

    #[error("Invalid base58 payload: {0}")]
    Base58(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid curve point: {0}")]
    InvalidPoint(String),
}
