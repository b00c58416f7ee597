//! # neo-sdk: Neo N3 transaction construction and signing
//!
//! Builds, signs and serializes Neo N3 transactions without a node:
//!
//! - [`io`] - little-endian binary codec with VarInt / VarBytes framing
//! - [`crypto`] - secp256r1 keys, ECDSA, hashes and Base58Check
//! - [`vm`] - NeoVM script builder and standard contract scripts
//! - [`core`] - transactions, signers, witness scopes and rules
//! - [`wallets`] - key pairs, WIF, NEP-2, multisig assembly and signing
//!
//! ## Quick Start
//!
//! ```rust
//! use neo_sdk::prelude::*;
//!
//! # fn main() -> Result<(), neo_sdk::SdkError> {
//! SdkContext::initialize()?;
//!
//! let key_pair = KeyPair::from_private_key(&[7u8; 32])?;
//! let tx = TransactionBuilder::new()
//!     .nonce(42)
//!     .valid_until_block(1000)
//!     .script(vec![0x11, 0x40])
//!     .signer(Signer::called_by_entry(key_pair.script_hash()))
//!     .build()?;
//!
//! let mut manager = TransactionManager::new(tx, ProtocolSettings::default());
//! manager.add_signature(&key_pair)?;
//! let signed = manager.sign()?;
//! assert_eq!(signed.witnesses().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod context;
pub mod error;
pub mod logging;

pub use context::SdkContext;
pub use error::{SdkError, SdkResult};

// Re-export the member crates
pub use neo_config as config;
pub use neo_core as core;
pub use neo_cryptography as crypto;
pub use neo_io as io;
pub use neo_vm as vm;
pub use neo_wallets as wallets;

/// Common imports for building and signing transactions
pub mod prelude {
    pub use crate::config::{NetworkType, ProtocolSettings};
    pub use crate::context::SdkContext;
    pub use crate::core::{
        Signer, SignerBuilder, Transaction, TransactionAttribute, TransactionBuilder, UInt160,
        UInt256, Witness, WitnessCondition, WitnessRule, WitnessRuleAction, WitnessScope,
    };
    pub use crate::crypto::{ECDsa, ECPoint, Signature};
    pub use crate::vm::{CallFlags, ContractParameter, OpCode, ScriptBuilder};
    pub use crate::wallets::{
        BlockCountProvider, Contract, KeyPair, MultisigWitnessBuilder, ScryptParameters,
        TransactionManager,
    };
}

/// Version of the SDK
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
