// Copyright (C) 2015-2025 The Neo Project.
//
// serialization.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction wire encoding.

use crate::signer::Signer;
use crate::witness::Witness;
use neo_config::{MAX_SCRIPT_LENGTH, MAX_TRANSACTION_ATTRIBUTES};
use neo_io::serializable::helper::{get_array_size, get_var_bytes_size};
use neo_io::{helper, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use once_cell::sync::OnceCell;

use super::attributes::TransactionAttribute;
use super::core::{
    check_unique_attributes, check_unique_signers, Transaction, HEADER_SIZE, MAX_TRANSACTION_SIZE,
};

impl Transaction {
    /// Size of the unsigned payload.
    pub fn unsigned_size(&self) -> usize {
        HEADER_SIZE
            + get_array_size(&self.signers)
            + get_array_size(&self.attributes)
            + get_var_bytes_size(&self.script)
    }

    /// Parses a full wire-form transaction.
    pub fn from_bytes(data: &[u8]) -> crate::CoreResult<Self> {
        if data.len() > MAX_TRANSACTION_SIZE {
            return Err(crate::CoreError::invalid_size(format!(
                "transaction of {} bytes exceeds {}",
                data.len(),
                MAX_TRANSACTION_SIZE
            )));
        }
        Ok(<Self as neo_io::SerializableExt>::from_array(data)?)
    }
}

impl Serializable for Transaction {
    fn size(&self) -> usize {
        self.unsigned_size() + get_array_size(&self.witnesses)
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        if self.signers.is_empty() {
            return Err(IoError::invalid_data("Transaction has no signers"));
        }
        if self.witnesses.len() != self.signers.len() {
            return Err(IoError::invalid_data("Witness count does not match signer count"));
        }
        self.serialize_unsigned(writer)?;
        helper::serialize_array(&self.witnesses, writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let version = reader.read_u8()?;
        if version > 0 {
            return Err(IoError::invalid_data(format!(
                "Unsupported transaction version {}",
                version
            )));
        }
        let nonce = reader.read_u32()?;
        let system_fee = reader.read_i64()?;
        if system_fee < 0 {
            return Err(IoError::invalid_data("Negative system fee"));
        }
        let network_fee = reader.read_i64()?;
        if network_fee < 0 {
            return Err(IoError::invalid_data("Negative network fee"));
        }
        if system_fee.checked_add(network_fee).is_none() {
            return Err(IoError::invalid_data("Fee overflow"));
        }
        let valid_until_block = reader.read_u32()?;

        let signers: Vec<Signer> = helper::deserialize_array(reader, MAX_TRANSACTION_ATTRIBUTES)?;
        if signers.is_empty() {
            return Err(IoError::invalid_data("Transaction has no signers"));
        }
        check_unique_signers(&signers).map_err(|e| IoError::invalid_data(e.to_string()))?;

        let attributes: Vec<TransactionAttribute> =
            helper::deserialize_array(reader, MAX_TRANSACTION_ATTRIBUTES - signers.len())?;
        check_unique_attributes(&attributes).map_err(|e| IoError::invalid_data(e.to_string()))?;

        let script = reader.read_var_bytes(MAX_SCRIPT_LENGTH)?;
        if script.is_empty() {
            return Err(IoError::invalid_data("Transaction script is empty"));
        }

        let witnesses: Vec<Witness> = helper::deserialize_array(reader, signers.len())?;
        if witnesses.len() != signers.len() {
            return Err(IoError::invalid_data("Witness count does not match signer count"));
        }

        Ok(Self {
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses,
            hash: OnceCell::new(),
        })
    }
}
