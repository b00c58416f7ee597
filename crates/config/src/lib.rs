//! Neo Configuration Module
//!
//! Protocol constants and network settings shared by every crate of the SDK.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Size of a hash (UInt256) in bytes
pub const HASH_SIZE: usize = 32;
/// Size of an address (UInt160) in bytes
pub const ADDRESS_SIZE: usize = 20;
/// Version byte prefixed to a script hash when encoding an address
pub const ADDRESS_VERSION: u8 = 0x35;

/// Maximum transaction size in bytes
pub const MAX_TRANSACTION_SIZE: usize = 102_400; // 100KB
/// Maximum number of signers plus attributes on a transaction
pub const MAX_TRANSACTION_ATTRIBUTES: usize = 16;
/// Maximum entries in each signer sub-list (contracts, groups, rules)
pub const MAX_SUBITEMS: usize = 16;
/// Maximum script length (64KB)
pub const MAX_SCRIPT_LENGTH: usize = 65536;
/// Maximum size of an invocation or verification script inside a witness
pub const MAX_WITNESS_SCRIPT_SIZE: usize = 1024;
/// Maximum number of keys a multi-signature contract may reference
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// Default window after the current height during which a transaction is valid
pub const MAX_VALID_UNTIL_BLOCK_INCREMENT: u32 = 5760;

/// Network type for Neo blockchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    #[default]
    MainNet,
    TestNet,
    Private,
}

impl NetworkType {
    /// Gets the network magic number
    pub fn magic(&self) -> u32 {
        match self {
            NetworkType::MainNet => 0x334f454e, // "NEO3" in little endian
            NetworkType::TestNet => 0x3554334e, // "N3T5" in little endian
            NetworkType::Private => 0x00000000,
        }
    }

    /// Gets the address version
    pub fn address_version(&self) -> u8 {
        ADDRESS_VERSION
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
            NetworkType::Private => write!(f, "private"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::MainNet),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "private" | "privnet" => Ok(NetworkType::Private),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown network type: {0}")]
    UnknownNetwork(String),

    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Protocol parameters the SDK needs when building and signing transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolSettings {
    /// Network magic mixed into every signature
    pub network: u32,
    /// Version byte of addresses derived on this network
    pub address_version: u8,
    pub max_valid_until_block_increment: u32,
    /// Largest signed transaction the network relays
    pub max_transaction_size: usize,
    /// Limit on signers plus attributes
    pub max_transaction_attributes: usize,
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self::for_network(NetworkType::MainNet)
    }
}

impl ProtocolSettings {
    /// Settings of a well-known network.
    pub fn for_network(network: NetworkType) -> Self {
        Self {
            network: network.magic(),
            address_version: network.address_version(),
            max_valid_until_block_increment: MAX_VALID_UNTIL_BLOCK_INCREMENT,
            max_transaction_size: MAX_TRANSACTION_SIZE,
            max_transaction_attributes: MAX_TRANSACTION_ATTRIBUTES,
        }
    }

    /// Parses settings from TOML text. Missing keys take MainNet defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: ProtocolSettings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading protocol settings");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_valid_until_block_increment == 0 {
            return Err(ConfigError::Invalid(
                "max_valid_until_block_increment must be positive".to_string(),
            ));
        }
        if self.max_transaction_attributes == 0
            || self.max_transaction_attributes > MAX_TRANSACTION_ATTRIBUTES
        {
            return Err(ConfigError::Invalid(format!(
                "max_transaction_attributes must be within 1..={}",
                MAX_TRANSACTION_ATTRIBUTES
            )));
        }
        if self.max_transaction_size == 0 || self.max_transaction_size > MAX_TRANSACTION_SIZE {
            return Err(ConfigError::Invalid(format!(
                "max_transaction_size must be within 1..={}",
                MAX_TRANSACTION_SIZE
            )));
        }
        Ok(())
    }
}
