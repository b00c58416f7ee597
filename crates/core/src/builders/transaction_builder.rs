// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Builder for unsigned transactions.

use crate::transaction::{Transaction, TransactionAttribute};
use crate::{CoreError, CoreResult, Signer};
use tracing::debug;

/// Assembles an unsigned [`Transaction`].
///
/// A random nonce is drawn when none is given. Building without any signer
/// fails, since the first signer pays the fees.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    version: u8,
    nonce: Option<u32>,
    system_fee: i64,
    network_fee: i64,
    valid_until_block: u32,
    script: Vec<u8>,
    signers: Vec<Signer>,
    attributes: Vec<TransactionAttribute>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn system_fee(mut self, fee: i64) -> Self {
        self.system_fee = fee;
        self
    }

    pub fn network_fee(mut self, fee: i64) -> Self {
        self.network_fee = fee;
        self
    }

    pub fn valid_until_block(mut self, height: u32) -> Self {
        self.valid_until_block = height;
        self
    }

    pub fn script(mut self, script: Vec<u8>) -> Self {
        self.script = script;
        self
    }

    pub fn signer(mut self, signer: Signer) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn attribute(mut self, attribute: TransactionAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn build(self) -> CoreResult<Transaction> {
        if self.signers.is_empty() {
            return Err(CoreError::state("a transaction needs at least one signer"));
        }
        if self.system_fee < 0 || self.network_fee < 0 {
            return Err(CoreError::invalid_argument("fees must not be negative"));
        }
        if self.script.is_empty() {
            return Err(CoreError::invalid_argument("transaction script is empty"));
        }

        let mut tx = Transaction::new();
        tx.set_version(self.version);
        tx.set_nonce(self.nonce.unwrap_or_else(rand::random));
        tx.set_system_fee(self.system_fee);
        tx.set_network_fee(self.network_fee);
        tx.set_valid_until_block(self.valid_until_block);
        tx.set_script(self.script);
        tx.set_signers(self.signers)?;
        tx.set_attributes(self.attributes)?;

        debug!(
            nonce = tx.nonce(),
            signers = tx.signers().len(),
            attributes = tx.attributes().len(),
            "built unsigned transaction"
        );
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UInt160;

    #[test]
    fn test_build_without_signers_fails() {
        let err = TransactionBuilder::new().script(vec![0x40]).build().unwrap_err();
        assert!(matches!(err, CoreError::State { .. }));
    }

    #[test]
    fn test_build_sets_fields() {
        let tx = TransactionBuilder::new()
            .nonce(42)
            .system_fee(1)
            .network_fee(2)
            .valid_until_block(3)
            .script(vec![0x40])
            .signer(Signer::called_by_entry(UInt160::new([5; 20])))
            .attribute(TransactionAttribute::HighPriority)
            .build()
            .unwrap();
        assert_eq!(tx.nonce(), 42);
        assert_eq!(tx.system_fee(), 1);
        assert_eq!(tx.network_fee(), 2);
        assert_eq!(tx.valid_until_block(), 3);
        assert_eq!(tx.sender(), Some(UInt160::new([5; 20])));
        assert_eq!(tx.attributes(), &[TransactionAttribute::HighPriority]);
    }

    #[test]
    fn test_build_rejects_duplicate_signers() {
        let account = UInt160::new([5; 20]);
        let result = TransactionBuilder::new()
            .script(vec![0x40])
            .signer(Signer::called_by_entry(account))
            .signer(Signer::global(account))
            .build();
        assert!(matches!(result, Err(CoreError::InvalidArgument { .. })));
    }
}
