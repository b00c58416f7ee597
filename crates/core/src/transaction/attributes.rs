// Copyright (C) 2015-2025 The Neo Project.
//
// attributes.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction attributes.

use crate::UInt256;
use neo_config::HASH_SIZE;
use neo_io::serializable::helper::get_var_bytes_size;
use neo_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

/// Maximum size of an oracle response result.
pub const MAX_ORACLE_RESULT_SIZE: usize = 0xffff;

/// Attribute type bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransactionAttributeType {
    HighPriority = 0x01,
    OracleResponse = 0x11,
    NotValidBefore = 0x20,
    Conflicts = 0x21,
}

impl TransactionAttributeType {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::HighPriority),
            0x11 => Some(Self::OracleResponse),
            0x20 => Some(Self::NotValidBefore),
            0x21 => Some(Self::Conflicts),
            _ => None,
        }
    }
}

/// Outcome reported by an oracle node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OracleResponseCode {
    Success = 0x00,
    ProtocolNotSupported = 0x10,
    ConsensusUnreachable = 0x12,
    NotFound = 0x14,
    Timeout = 0x16,
    Forbidden = 0x18,
    ResponseTooLarge = 0x1a,
    InsufficientFunds = 0x1c,
    ContentTypeNotSupported = 0x1f,
    Error = 0xff,
}

impl OracleResponseCode {
    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Success),
            0x10 => Some(Self::ProtocolNotSupported),
            0x12 => Some(Self::ConsensusUnreachable),
            0x14 => Some(Self::NotFound),
            0x16 => Some(Self::Timeout),
            0x18 => Some(Self::Forbidden),
            0x1a => Some(Self::ResponseTooLarge),
            0x1c => Some(Self::InsufficientFunds),
            0x1f => Some(Self::ContentTypeNotSupported),
            0xff => Some(Self::Error),
            _ => None,
        }
    }
}

/// Extra data attached to a transaction, tagged by a type byte on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionAttribute {
    /// Committee-only priority in the memory pool.
    HighPriority,
    /// Response to an oracle request; only valid in oracle transactions.
    OracleResponse {
        id: u64,
        code: OracleResponseCode,
        result: Vec<u8>,
    },
    /// The transaction is not valid before `height`.
    NotValidBefore { height: u32 },
    /// The transaction conflicts with the one identified by `hash`.
    Conflicts { hash: UInt256 },
}

impl TransactionAttribute {
    pub fn attribute_type(&self) -> TransactionAttributeType {
        match self {
            TransactionAttribute::HighPriority => TransactionAttributeType::HighPriority,
            TransactionAttribute::OracleResponse { .. } => TransactionAttributeType::OracleResponse,
            TransactionAttribute::NotValidBefore { .. } => TransactionAttributeType::NotValidBefore,
            TransactionAttribute::Conflicts { .. } => TransactionAttributeType::Conflicts,
        }
    }

    /// Whether several attributes of this type may appear on one transaction.
    pub fn allow_multiple(&self) -> bool {
        matches!(self, TransactionAttribute::Conflicts { .. })
    }
}

impl Serializable for TransactionAttribute {
    fn size(&self) -> usize {
        1 + match self {
            TransactionAttribute::HighPriority => 0,
            TransactionAttribute::OracleResponse { result, .. } => 8 + 1 + get_var_bytes_size(result),
            TransactionAttribute::NotValidBefore { .. } => 4,
            TransactionAttribute::Conflicts { .. } => HASH_SIZE,
        }
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.attribute_type() as u8)?;
        match self {
            TransactionAttribute::HighPriority => Ok(()),
            TransactionAttribute::OracleResponse { id, code, result } => {
                writer.write_u64(*id)?;
                writer.write_u8(*code as u8)?;
                writer.write_var_bytes(result)
            }
            TransactionAttribute::NotValidBefore { height } => writer.write_u32(*height),
            TransactionAttribute::Conflicts { hash } => Serializable::serialize(hash, writer),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let type_byte = reader.read_u8()?;
        let attribute_type = TransactionAttributeType::from_byte(type_byte).ok_or_else(|| {
            IoError::invalid_data(format!("Unknown attribute type 0x{:02x}", type_byte))
        })?;
        let attribute = match attribute_type {
            TransactionAttributeType::HighPriority => TransactionAttribute::HighPriority,
            TransactionAttributeType::OracleResponse => {
                let id = reader.read_u64()?;
                let code_byte = reader.read_u8()?;
                let code = OracleResponseCode::from_byte(code_byte).ok_or_else(|| {
                    IoError::invalid_data(format!("Unknown oracle response code 0x{:02x}", code_byte))
                })?;
                let result = reader.read_var_bytes(MAX_ORACLE_RESULT_SIZE)?;
                if code != OracleResponseCode::Success && !result.is_empty() {
                    return Err(IoError::invalid_data("Failed oracle response carries a result"));
                }
                TransactionAttribute::OracleResponse { id, code, result }
            }
            TransactionAttributeType::NotValidBefore => TransactionAttribute::NotValidBefore {
                height: reader.read_u32()?,
            },
            TransactionAttributeType::Conflicts => TransactionAttribute::Conflicts {
                hash: <UInt256 as Serializable>::deserialize(reader)?,
            },
        };
        Ok(attribute)
    }
}
