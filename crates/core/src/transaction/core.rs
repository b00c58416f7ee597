// Copyright (C) 2015-2025 The Neo Project.
//
// core.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Core Transaction struct and its hashed fields.

use crate::signer::Signer;
use crate::witness::Witness;
use crate::{CoreError, CoreResult, UInt160, UInt256};
use neo_config::MAX_TRANSACTION_ATTRIBUTES;
use neo_cryptography::hash::sha256;
use neo_io::{BinaryWriter, IoResult, Serializable};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::fmt;

use super::attributes::TransactionAttribute;

/// Maximum size of a transaction in bytes.
pub const MAX_TRANSACTION_SIZE: usize = neo_config::MAX_TRANSACTION_SIZE;

/// The size of a transaction header in bytes.
pub const HEADER_SIZE: usize = 1 +  // Version (byte)
    4 +  // Nonce (uint32)
    8 +  // SystemFee (int64)
    8 +  // NetworkFee (int64)
    4; // ValidUntilBlock (uint32)

/// A Neo N3 transaction.
///
/// The hash covers every field except the witnesses. It is computed on first
/// use and cached; every setter of a hashed field drops the cached value.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub(crate) version: u8,
    pub(crate) nonce: u32,
    /// In datoshi, 1 datoshi = 1e-8 GAS
    pub(crate) system_fee: i64,
    /// In datoshi, 1 datoshi = 1e-8 GAS
    pub(crate) network_fee: i64,
    pub(crate) valid_until_block: u32,
    pub(crate) signers: Vec<Signer>,
    pub(crate) attributes: Vec<TransactionAttribute>,
    pub(crate) script: Vec<u8>,
    pub(crate) witnesses: Vec<Witness>,
    pub(crate) hash: OnceCell<UInt256>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn set_version(&mut self, value: u8) {
        self.version = value;
        self.invalidate_cache();
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn set_nonce(&mut self, value: u32) {
        self.nonce = value;
        self.invalidate_cache();
    }

    pub fn system_fee(&self) -> i64 {
        self.system_fee
    }

    pub fn set_system_fee(&mut self, value: i64) {
        self.system_fee = value;
        self.invalidate_cache();
    }

    pub fn network_fee(&self) -> i64 {
        self.network_fee
    }

    pub fn set_network_fee(&mut self, value: i64) {
        self.network_fee = value;
        self.invalidate_cache();
    }

    pub fn valid_until_block(&self) -> u32 {
        self.valid_until_block
    }

    pub fn set_valid_until_block(&mut self, value: u32) {
        self.valid_until_block = value;
        self.invalidate_cache();
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn set_script(&mut self, value: Vec<u8>) {
        self.script = value;
        self.invalidate_cache();
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// The fee-paying account, i.e. the first signer.
    pub fn sender(&self) -> Option<UInt160> {
        self.signers.first().map(|s| *s.account())
    }

    /// Replaces the signer list. Accounts must be unique.
    pub fn set_signers(&mut self, signers: Vec<Signer>) -> CoreResult<()> {
        check_unique_signers(&signers)?;
        check_attribute_budget(signers.len(), self.attributes.len())?;
        self.signers = signers;
        self.invalidate_cache();
        Ok(())
    }

    pub fn add_signer(&mut self, signer: Signer) -> CoreResult<()> {
        if self.signers.iter().any(|s| s.account() == signer.account()) {
            return Err(CoreError::invalid_argument(format!(
                "signer {} is already present",
                signer.account()
            )));
        }
        check_attribute_budget(self.signers.len() + 1, self.attributes.len())?;
        self.signers.push(signer);
        self.invalidate_cache();
        Ok(())
    }

    /// Replaces the attribute list.
    pub fn set_attributes(&mut self, attributes: Vec<TransactionAttribute>) -> CoreResult<()> {
        check_attribute_budget(self.signers.len(), attributes.len())?;
        check_unique_attributes(&attributes)?;
        self.attributes = attributes;
        self.invalidate_cache();
        Ok(())
    }

    pub fn add_attribute(&mut self, attribute: TransactionAttribute) -> CoreResult<()> {
        check_attribute_budget(self.signers.len(), self.attributes.len() + 1)?;
        if !attribute.allow_multiple()
            && self
                .attributes
                .iter()
                .any(|a| a.attribute_type() == attribute.attribute_type())
        {
            return Err(CoreError::invalid_argument(format!(
                "attribute {:?} may appear only once",
                attribute.attribute_type()
            )));
        }
        self.attributes.push(attribute);
        self.invalidate_cache();
        Ok(())
    }

    /// Replaces the witnesses. Witnesses are not hashed, so the cached hash
    /// survives.
    pub fn set_witnesses(&mut self, witnesses: Vec<Witness>) {
        self.witnesses = witnesses;
    }

    pub fn add_witness(&mut self, witness: Witness) {
        self.witnesses.push(witness);
    }

    /// The transaction id: SHA-256 of the unsigned payload.
    pub fn hash(&self) -> CoreResult<UInt256> {
        self.hash
            .get_or_try_init(|| {
                let data = self.get_hash_data()?;
                Ok(UInt256::new(sha256(&data)))
            })
            .copied()
    }

    /// The unsigned payload: every field except the witnesses.
    pub fn get_hash_data(&self) -> CoreResult<Vec<u8>> {
        self.ensure_signers()?;
        let mut writer = BinaryWriter::with_capacity(self.unsigned_size());
        self.serialize_unsigned(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// The bytes each signer signs: network magic (u32 LE) followed by the
    /// transaction id in wire order.
    pub fn get_sign_data(&self, network: u32) -> CoreResult<Vec<u8>> {
        let hash = self.hash()?;
        let mut data = Vec::with_capacity(4 + 32);
        data.extend_from_slice(&network.to_le_bytes());
        data.extend_from_slice(hash.as_bytes());
        Ok(data)
    }

    /// The full wire form, witnesses included.
    pub fn to_bytes(&self) -> CoreResult<Vec<u8>> {
        self.ensure_signers()?;
        if self.witnesses.len() != self.signers.len() {
            return Err(CoreError::state(format!(
                "{} witnesses for {} signers",
                self.witnesses.len(),
                self.signers.len()
            )));
        }
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    pub(crate) fn ensure_signers(&self) -> CoreResult<()> {
        if self.signers.is_empty() {
            return Err(CoreError::state("transaction has no signers"));
        }
        Ok(())
    }

    pub(crate) fn serialize_unsigned(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.version)?;
        writer.write_u32(self.nonce)?;
        writer.write_i64(self.system_fee)?;
        writer.write_i64(self.network_fee)?;
        writer.write_u32(self.valid_until_block)?;
        neo_io::helper::serialize_array(&self.signers, writer)?;
        neo_io::helper::serialize_array(&self.attributes, writer)?;
        writer.write_var_bytes(&self.script)
    }

    pub(crate) fn invalidate_cache(&mut self) {
        self.hash.take();
    }
}

pub(crate) fn check_unique_signers(signers: &[Signer]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(signers.len());
    for signer in signers {
        if !seen.insert(*signer.account()) {
            return Err(CoreError::invalid_argument(format!(
                "signer {} appears more than once",
                signer.account()
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_unique_attributes(attributes: &[TransactionAttribute]) -> CoreResult<()> {
    let mut seen = HashSet::new();
    for attribute in attributes.iter().filter(|a| !a.allow_multiple()) {
        if !seen.insert(attribute.attribute_type()) {
            return Err(CoreError::invalid_argument(format!(
                "attribute {:?} may appear only once",
                attribute.attribute_type()
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_attribute_budget(signers: usize, attributes: usize) -> CoreResult<()> {
    if signers + attributes > MAX_TRANSACTION_ATTRIBUTES {
        return Err(CoreError::invalid_size(format!(
            "{} signers and {} attributes exceed the limit of {}",
            signers, attributes, MAX_TRANSACTION_ATTRIBUTES
        )));
    }
    Ok(())
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.nonce == other.nonce
            && self.system_fee == other.system_fee
            && self.network_fee == other.network_fee
            && self.valid_until_block == other.valid_until_block
            && self.signers == other.signers
            && self.attributes == other.attributes
            && self.script == other.script
            && self.witnesses == other.witnesses
    }
}

impl Eq for Transaction {}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {{ version: {}, nonce: {}, system_fee: {}, network_fee: {}, valid_until_block: {}, signers: {}, script_len: {} }}",
            self.version,
            self.nonce,
            self.system_fee,
            self.network_fee,
            self.valid_until_block,
            self.signers.len(),
            self.script.len()
        )
    }
}
