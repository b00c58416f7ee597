//! Neo Wallets Library
//!
//! Key handling and witness assembly for Neo N3 clients:
//! - secp256r1 key pairs with WIF and NEP-2 import/export
//! - standard verification contracts and their addresses
//! - threshold (multi-signature) witness combination
//! - signing orchestration for whole transactions

pub mod contract;
pub mod key_pair;
pub mod multisig;
pub mod nep2;
pub mod scrypt_parameters;
pub mod transaction_manager;
pub mod wif;

// Re-export main types
pub use contract::Contract;
pub use key_pair::KeyPair;
pub use multisig::MultisigWitnessBuilder;
pub use scrypt_parameters::ScryptParameters;
pub use transaction_manager::{BlockCountProvider, TransactionManager};

use neo_core::UInt160;
use thiserror::Error;

/// Result type for wallet operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid state: {0}")]
    State(String),

    #[error("Insufficient signatures: {required} required, {provided} provided")]
    InsufficientSignatures { required: usize, provided: usize },

    #[error("Account not found: {0}")]
    AccountNotFound(UInt160),

    #[error("Scrypt error: {0}")]
    Scrypt(String),

    #[error("Cryptography error: {0}")]
    Cryptography(#[from] neo_cryptography::Error),

    #[error("Core error: {0}")]
    Core(#[from] neo_core::CoreError),

    #[error("VM error: {0}")]
    Vm(#[from] neo_vm::VmError),
}

impl Error {
    pub(crate) fn state(message: impl Into<String>) -> Self {
        Error::State(message.into())
    }
}
