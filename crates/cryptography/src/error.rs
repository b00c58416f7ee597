use thiserror::Error;

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cryptographic errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("Invalid Base58 string: {0}")]
    InvalidBase58(String),

    #[error("Base58Check checksum mismatch")]
    InvalidChecksum,

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
