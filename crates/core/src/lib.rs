// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # Neo Core
//!
//! Transaction model for the Neo N3 SDK.
//!
//! This crate holds the types that end up on the wire when a client builds
//! a transaction: script hashes, signers with their witness scopes and
//! rules, witnesses, attributes and the transaction itself.
//!
//! ## Example
//!
//! ```rust
//! use neo_core::{Signer, TransactionBuilder, UInt160};
//!
//! let tx = TransactionBuilder::new()
//!     .nonce(1)
//!     .valid_until_block(100)
//!     .script(vec![0x11, 0x40])
//!     .signer(Signer::called_by_entry(UInt160::zero()))
//!     .build()
//!     .unwrap();
//! assert_eq!(tx.signers().len(), 1);
//! ```

pub mod builders;
pub mod error;
pub mod signer;
pub mod transaction;
pub mod uint160;
pub mod uint256;
pub mod witness;
pub mod witness_rule;
pub mod witness_scope;

pub use builders::{SignerBuilder, TransactionBuilder};
pub use error::{CoreError, CoreResult};
pub use signer::Signer;
pub use transaction::{
    OracleResponseCode, Transaction, TransactionAttribute, TransactionAttributeType,
};
pub use uint160::UInt160;
pub use uint256::UInt256;
pub use witness::Witness;
pub use witness_rule::{WitnessCondition, WitnessRule, WitnessRuleAction};
pub use witness_scope::WitnessScope;
