// Copyright (C) 2015-2025 The Neo Project.
//
// uint256.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! 256-bit identifiers: transaction and block hashes.

use crate::{CoreError, CoreResult};
use neo_config::HASH_SIZE;
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 256-bit hash, stored in wire (little-endian) order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UInt256([u8; HASH_SIZE]);

impl UInt256 {
    pub const fn zero() -> Self {
        Self([0u8; HASH_SIZE])
    }

    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a value from wire-order bytes.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let array: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            CoreError::invalid_format(format!(
                "UInt256 needs {} bytes, got {}",
                HASH_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({})", self)
    }
}

impl FromStr for UInt256 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != HASH_SIZE * 2 {
            return Err(CoreError::invalid_format(format!(
                "UInt256 needs {} hex characters, got {}",
                HASH_SIZE * 2,
                s.len()
            )));
        }
        let mut bytes = hex::decode(s).map_err(|e| CoreError::invalid_format(e.to_string()))?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }
}

impl From<[u8; HASH_SIZE]> for UInt256 {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Serializable for UInt256 {
    fn size(&self) -> usize {
        HASH_SIZE
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.0)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(reader.read_memory(HASH_SIZE)?);
        Ok(Self(bytes))
    }
}

impl Serialize for UInt256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_reverses_wire_order() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        bytes[31] = 0xff;
        let hash = UInt256::new(bytes);
        let text = hash.to_string();
        assert!(text.starts_with("0xff"));
        assert!(text.ends_with("01"));
        assert_eq!(text.parse::<UInt256>().unwrap(), hash);
    }

    #[test]
    fn test_from_bytes_length() {
        assert!(UInt256::from_bytes(&[0u8; 31]).is_err());
        assert!(UInt256::from_bytes(&[0u8; 32]).unwrap().is_zero());
    }

    #[test]
    fn test_serde_string() {
        let hash = UInt256::new([7u8; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "07".repeat(32)));
        assert_eq!(serde_json::from_str::<UInt256>(&json).unwrap(), hash);
    }
}
