//! Error type spanning every crate of the SDK.

use thiserror::Error;

/// Any failure surfaced by the SDK.
#[derive(Error, Debug)]
pub enum SdkError {
    /// Binary encoding or decoding failed
    #[error(transparent)]
    Io(#[from] neo_io::IoError),

    /// Key, signature or encoding failure
    #[error(transparent)]
    Cryptography(#[from] neo_cryptography::Error),

    /// Transaction model violation
    #[error(transparent)]
    Core(#[from] neo_core::CoreError),

    /// Script assembly failure
    #[error(transparent)]
    Vm(#[from] neo_vm::VmError),

    /// Key management or signing failure
    #[error(transparent)]
    Wallet(#[from] neo_wallets::Error),

    /// Invalid protocol settings
    #[error(transparent)]
    Config(#[from] neo_config::ConfigError),

    /// The one-time self-test failed; the SDK must not be used
    #[error("SDK initialization failed: {0}")]
    Initialization(String),

    /// The tracing subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Result alias used by the SDK facade
pub type SdkResult<T> = std::result::Result<T, SdkError>;
