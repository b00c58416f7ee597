// Copyright (C) 2015-2025 The Neo Project.
//
// uint160.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! 160-bit identifiers: script hashes and account addresses.

use crate::{CoreError, CoreResult};
use neo_config::{ADDRESS_SIZE, ADDRESS_VERSION};
use neo_cryptography::{hash, FromBase58Check, ToBase58Check};
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 160-bit hash, stored in wire (little-endian) order.
///
/// `Display` and `FromStr` use the big-endian form with a `0x` prefix, the
/// way block explorers and RPC nodes print script hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UInt160([u8; ADDRESS_SIZE]);

impl UInt160 {
    pub const fn zero() -> Self {
        Self([0u8; ADDRESS_SIZE])
    }

    /// Builds a value from wire-order bytes.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let array: [u8; ADDRESS_SIZE] = bytes.try_into().map_err(|_| {
            CoreError::invalid_format(format!(
                "UInt160 needs {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Hash160 of a script.
    pub fn from_script(script: &[u8]) -> Self {
        Self(hash::hash160(script))
    }

    /// Wire-order bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_SIZE]
    }

    /// Encodes the hash as a Base58Check address with the default version.
    pub fn to_address(&self) -> String {
        self.to_address_with_version(ADDRESS_VERSION)
    }

    pub fn to_address_with_version(&self, version: u8) -> String {
        let mut data = Vec::with_capacity(1 + ADDRESS_SIZE);
        data.push(version);
        data.extend_from_slice(&self.0);
        data.to_base58_check()
    }

    /// Decodes a Base58Check address with the default version.
    pub fn from_address(address: &str) -> CoreResult<Self> {
        Self::from_address_with_version(address, ADDRESS_VERSION)
    }

    pub fn from_address_with_version(address: &str, version: u8) -> CoreResult<Self> {
        let data = Vec::<u8>::from_base58_check(address)
            .map_err(|e| CoreError::invalid_format(format!("invalid address: {}", e)))?;
        if data.len() != 1 + ADDRESS_SIZE {
            return Err(CoreError::invalid_format(format!(
                "address payload must be {} bytes, got {}",
                1 + ADDRESS_SIZE,
                data.len()
            )));
        }
        if data[0] != version {
            return Err(CoreError::invalid_format(format!(
                "address version 0x{:02x} does not match 0x{:02x}",
                data[0], version
            )));
        }
        Self::from_bytes(&data[1..])
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({})", self)
    }
}

impl FromStr for UInt160 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != ADDRESS_SIZE * 2 {
            return Err(CoreError::invalid_format(format!(
                "UInt160 needs {} hex characters, got {}",
                ADDRESS_SIZE * 2,
                s.len()
            )));
        }
        let mut bytes = hex::decode(s).map_err(|e| CoreError::invalid_format(e.to_string()))?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }
}

impl From<[u8; ADDRESS_SIZE]> for UInt160 {
    fn from(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl Serializable for UInt160 {
    fn size(&self) -> usize {
        ADDRESS_SIZE
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.0)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(reader.read_memory(ADDRESS_SIZE)?);
        Ok(Self(bytes))
    }
}

impl Serialize for UInt160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt160 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::SerializableExt;

    const SCRIPT: &str =
        "0c21035a928f201639204e06b4368b1a93365462a8ebbff0b8818151b74faab3a2b61a4156e7b327";

    #[test]
    fn test_script_hash_display_is_reversed() {
        let hash = UInt160::from_script(&hex::decode(SCRIPT).unwrap());
        assert_eq!(hex::encode(hash.as_bytes()), "0da967a400432bf27f8e8eb46fe8ac659eccde04");
        assert_eq!(hash.to_string(), "0x04decc9e65ace86fb48e8e7ff22b4300a467a90d");
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let a: UInt160 = "0x04decc9e65ace86fb48e8e7ff22b4300a467a90d".parse().unwrap();
        let b: UInt160 = "04decc9e65ace86fb48e8e7ff22b4300a467a90d".parse().unwrap();
        assert_eq!(a, b);
        assert!("0x04de".parse::<UInt160>().is_err());
        assert!("zz".repeat(20).parse::<UInt160>().is_err());
    }

    #[test]
    fn test_address_encoding() {
        let hash = UInt160::from_script(&hex::decode(SCRIPT).unwrap());
        let address = hash.to_address();
        assert_eq!(address, "NMACuhqEaNAeDSQVipcUPYiJ9TVgVyUxGV");
        assert!(address.starts_with('N'));
        assert_eq!(UInt160::from_address(&address).unwrap(), hash);
    }

    #[test]
    fn test_address_version_mismatch() {
        let hash = UInt160::zero();
        let address = hash.to_address_with_version(0x17);
        assert!(matches!(
            UInt160::from_address(&address),
            Err(CoreError::InvalidFormat { .. })
        ));
        assert_eq!(UInt160::from_address_with_version(&address, 0x17).unwrap(), hash);
    }

    #[test]
    fn test_wire_form() {
        let hash: UInt160 = "0x04decc9e65ace86fb48e8e7ff22b4300a467a90d".parse().unwrap();
        let bytes = hash.to_array().unwrap();
        assert_eq!(bytes, hash.to_bytes().to_vec());
        assert_eq!(UInt160::from_array(&bytes).unwrap(), hash);
        assert!(UInt160::from_array(&bytes[..19]).is_err());
    }
}
