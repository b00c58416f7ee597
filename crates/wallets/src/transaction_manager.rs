//! Signing orchestration for a whole transaction.

use crate::key_pair::KeyPair;
use crate::multisig::MultisigWitnessBuilder;
use crate::{Error, Result};
use neo_config::ProtocolSettings;
use neo_core::{CoreError, Transaction, UInt160, Witness};
use neo_cryptography::ECPoint;
use neo_vm::ScriptBuilder;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Source of the current chain height, usually a `getblockcount` RPC call.
pub trait BlockCountProvider {
    fn block_count(&self) -> Result<u32>;
}

/// Collects witnesses for every signer of a transaction and attaches them
/// in signer order.
#[derive(Debug)]
pub struct TransactionManager {
    tx: Transaction,
    settings: ProtocolSettings,
    witnesses: HashMap<UInt160, Witness>,
    pending: HashMap<UInt160, MultisigWitnessBuilder>,
}

impl TransactionManager {
    pub fn new(tx: Transaction, settings: ProtocolSettings) -> Self {
        Self {
            tx,
            settings,
            witnesses: HashMap::new(),
            pending: HashMap::new(),
        }
    }

    /// Like [`TransactionManager::new`], but fills an unset valid-until-block
    /// with the furthest height the network accepts.
    pub fn with_block_count(
        mut tx: Transaction,
        settings: ProtocolSettings,
        provider: &dyn BlockCountProvider,
    ) -> Result<Self> {
        if tx.valid_until_block() == 0 {
            let block_count = provider.block_count()?;
            let height = block_count
                .checked_add(settings.max_valid_until_block_increment)
                .and_then(|h| h.checked_sub(1))
                .ok_or_else(|| {
                    Error::InvalidArgument(format!("block count {} out of range", block_count))
                })?;
            debug!(block_count, valid_until_block = height, "valid-until-block defaulted");
            tx.set_valid_until_block(height);
        }
        Ok(Self::new(tx, settings))
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    pub fn settings(&self) -> &ProtocolSettings {
        &self.settings
    }

    /// Signs with `key_pair` for the signer whose account is the key's
    /// single-signature script hash.
    pub fn add_signature(&mut self, key_pair: &KeyPair) -> Result<()> {
        let account = key_pair.script_hash();
        self.ensure_signer(&account)?;
        let sign_data = self.tx.get_sign_data(self.settings.network)?;
        let signature = key_pair.sign(&sign_data)?;
        let witness = Witness::new(
            ScriptBuilder::build_invocation_script(&signature),
            key_pair.verification_script(),
        )?;
        debug!(%account, "single-signature witness added");
        self.witnesses.insert(account, witness);
        Ok(())
    }

    /// Contributes one signature to the `threshold`-of-`public_keys` signer.
    pub fn add_multisig(
        &mut self,
        key_pair: &KeyPair,
        threshold: usize,
        public_keys: &[ECPoint],
    ) -> Result<()> {
        let builder = MultisigWitnessBuilder::new(threshold, public_keys)?;
        let account = builder.script_hash();
        self.ensure_signer(&account)?;
        let sign_data = self.tx.get_sign_data(self.settings.network)?;
        let signature = key_pair.sign(&sign_data)?;
        self.pending
            .entry(account)
            .or_insert(builder)
            .add_signature(*key_pair.public_key(), signature)
    }

    /// Attaches a witness produced elsewhere, e.g. for a contract account.
    ///
    /// A non-empty verification script must hash to `account`.
    pub fn add_witness(&mut self, account: UInt160, witness: Witness) -> Result<()> {
        self.ensure_signer(&account)?;
        if !witness.verification_script().is_empty() && witness.script_hash() != account {
            return Err(Error::InvalidArgument(format!(
                "witness verification script does not hash to {}",
                account
            )));
        }
        self.witnesses.insert(account, witness);
        Ok(())
    }

    /// Attaches one witness per signer, in signer order, and returns the
    /// signed transaction.
    ///
    /// Fails when the transaction exceeds the attribute or size limits of
    /// the configured network.
    pub fn sign(mut self) -> Result<Transaction> {
        let entries = self.tx.signers().len() + self.tx.attributes().len();
        if entries > self.settings.max_transaction_attributes {
            return Err(Error::Core(CoreError::invalid_size(format!(
                "{} signers and attributes exceed the network limit of {}",
                entries, self.settings.max_transaction_attributes
            ))));
        }

        let mut ordered = Vec::with_capacity(self.tx.signers().len());
        for signer in self.tx.signers() {
            let account = signer.account();
            let witness = match self.witnesses.remove(account) {
                Some(witness) => witness,
                None => match self.pending.get(account) {
                    Some(builder) => builder.build()?,
                    None => {
                        warn!(%account, "signer has no witness");
                        return Err(Error::state(format!("missing witness for signer {}", account)));
                    }
                },
            };
            ordered.push(witness);
        }
        self.tx.set_witnesses(ordered);

        let size = self.tx.to_bytes()?.len();
        if size > self.settings.max_transaction_size {
            return Err(Error::Core(CoreError::invalid_size(format!(
                "signed transaction of {} bytes exceeds the network limit of {}",
                size, self.settings.max_transaction_size
            ))));
        }
        debug!(size, hash = %self.tx.hash()?, "transaction signed");
        Ok(self.tx)
    }

    fn ensure_signer(&self, account: &UInt160) -> Result<()> {
        if self.tx.signers().iter().any(|s| s.account() == account) {
            Ok(())
        } else {
            Err(Error::AccountNotFound(*account))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::{Signer, TransactionBuilder};

    struct Height(u32);

    impl BlockCountProvider for Height {
        fn block_count(&self) -> Result<u32> {
            Ok(self.0)
        }
    }

    fn unsigned_for(key_pair: &KeyPair) -> Transaction {
        TransactionBuilder::new()
            .nonce(1)
            .script(vec![0x11, 0x40])
            .signer(Signer::called_by_entry(key_pair.script_hash()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_until_block_from_height() {
        let key_pair = KeyPair::from_private_key(&[1u8; 32]).unwrap();
        let manager = TransactionManager::with_block_count(
            unsigned_for(&key_pair),
            ProtocolSettings::default(),
            &Height(100),
        )
        .unwrap();
        assert_eq!(manager.transaction().valid_until_block(), 100 + 5759);
    }

    #[test]
    fn test_valid_until_block_overflow() {
        let key_pair = KeyPair::from_private_key(&[1u8; 32]).unwrap();
        let result = TransactionManager::with_block_count(
            unsigned_for(&key_pair),
            ProtocolSettings::default(),
            &Height(u32::MAX),
        );
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_witness_verifies() {
        let key_pair = KeyPair::from_private_key(&[1u8; 32]).unwrap();
        let settings = ProtocolSettings::default();
        let mut manager = TransactionManager::new(unsigned_for(&key_pair), settings.clone());
        manager.add_signature(&key_pair).unwrap();
        let tx = manager.sign().unwrap();

        let invocation = tx.witnesses()[0].invocation_script();
        assert_eq!(invocation.len(), 66);
        let signature = neo_cryptography::Signature::from_bytes(&invocation[2..]).unwrap();
        let sign_data = tx.get_sign_data(settings.network).unwrap();
        assert!(key_pair.verify(&sign_data, &signature));
    }

    #[test]
    fn test_foreign_multisig_rejected() {
        let key_pair = KeyPair::from_private_key(&[1u8; 32]).unwrap();
        let other = KeyPair::from_private_key(&[2u8; 32]).unwrap();
        let mut manager = TransactionManager::new(unsigned_for(&key_pair), ProtocolSettings::default());
        let keys = [*key_pair.public_key(), *other.public_key()];
        assert!(matches!(
            manager.add_multisig(&key_pair, 1, &keys),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_network_limits_enforced() {
        let key_pair = KeyPair::from_private_key(&[1u8; 32]).unwrap();

        let mut settings = ProtocolSettings::default();
        settings.max_transaction_size = 64;
        let mut manager = TransactionManager::new(unsigned_for(&key_pair), settings);
        manager.add_signature(&key_pair).unwrap();
        assert!(matches!(
            manager.sign(),
            Err(Error::Core(CoreError::InvalidSize { .. }))
        ));

        let mut tx = unsigned_for(&key_pair);
        tx.add_attribute(neo_core::TransactionAttribute::HighPriority)
            .unwrap();
        let mut settings = ProtocolSettings::default();
        settings.max_transaction_attributes = 1;
        let mut manager = TransactionManager::new(tx, settings);
        manager.add_signature(&key_pair).unwrap();
        assert!(matches!(
            manager.sign(),
            Err(Error::Core(CoreError::InvalidSize { .. }))
        ));
    }
}
