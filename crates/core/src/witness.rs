// Copyright (C) 2015-2025 The Neo Project.
//
// witness.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witnesses: the scripts that prove a signer authorized a transaction.

use crate::{CoreError, CoreResult, UInt160};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use neo_config::MAX_WITNESS_SCRIPT_SIZE;
use neo_io::serializable::helper::get_var_bytes_size;
use neo_io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum size of an invocation script.
pub const MAX_INVOCATION_SCRIPT: usize = MAX_WITNESS_SCRIPT_SIZE;
/// Maximum size of a verification script.
pub const MAX_VERIFICATION_SCRIPT: usize = MAX_WITNESS_SCRIPT_SIZE;

/// An invocation script (pushes signatures) paired with the verification
/// script (checks them) whose hash identifies the signing account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Witness {
    invocation_script: Vec<u8>,
    verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> CoreResult<Self> {
        if invocation_script.len() > MAX_INVOCATION_SCRIPT {
            return Err(CoreError::invalid_size(format!(
                "invocation script of {} bytes exceeds {}",
                invocation_script.len(),
                MAX_INVOCATION_SCRIPT
            )));
        }
        if verification_script.len() > MAX_VERIFICATION_SCRIPT {
            return Err(CoreError::invalid_size(format!(
                "verification script of {} bytes exceeds {}",
                verification_script.len(),
                MAX_VERIFICATION_SCRIPT
            )));
        }
        Ok(Self {
            invocation_script,
            verification_script,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn invocation_script(&self) -> &[u8] {
        &self.invocation_script
    }

    pub fn verification_script(&self) -> &[u8] {
        &self.verification_script
    }

    /// Hash160 of the verification script; equals the signer's account for
    /// standard contracts.
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script)
    }
}

impl Serializable for Witness {
    fn size(&self) -> usize {
        get_var_bytes_size(&self.invocation_script) + get_var_bytes_size(&self.verification_script)
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_var_bytes(&self.invocation_script)?;
        writer.write_var_bytes(&self.verification_script)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let invocation_script = reader.read_var_bytes(MAX_INVOCATION_SCRIPT)?;
        let verification_script = reader.read_var_bytes(MAX_VERIFICATION_SCRIPT)?;
        Ok(Self {
            invocation_script,
            verification_script,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct WitnessJson {
    invocation: String,
    verification: String,
}

impl Serialize for Witness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WitnessJson {
            invocation: STANDARD.encode(&self.invocation_script),
            verification: STANDARD.encode(&self.verification_script),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Witness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let json = WitnessJson::deserialize(deserializer)?;
        let invocation = STANDARD.decode(json.invocation).map_err(D::Error::custom)?;
        let verification = STANDARD.decode(json.verification).map_err(D::Error::custom)?;
        Witness::new(invocation, verification).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::SerializableExt;

    #[test]
    fn test_wire_form() {
        let witness = Witness::new(vec![0x0c, 0x01, 0xaa], vec![0x40]).unwrap();
        let bytes = witness.to_array().unwrap();
        assert_eq!(bytes, vec![0x03, 0x0c, 0x01, 0xaa, 0x01, 0x40]);
        assert_eq!(Witness::from_array(&bytes).unwrap(), witness);
    }

    #[test]
    fn test_script_limits() {
        assert!(Witness::new(vec![0; 1024], vec![0; 1024]).is_ok());
        assert!(matches!(
            Witness::new(vec![0; 1025], vec![]),
            Err(CoreError::InvalidSize { .. })
        ));
        assert!(Witness::new(vec![], vec![0; 1025]).is_err());
    }

    #[test]
    fn test_script_hash_matches_verification_script() {
        let witness = Witness::new(vec![], vec![0x41, 0x56, 0xe7, 0xb3, 0x27]).unwrap();
        assert_eq!(
            witness.script_hash(),
            UInt160::from_script(&[0x41, 0x56, 0xe7, 0xb3, 0x27])
        );
    }

    #[test]
    fn test_json_base64() {
        let witness = Witness::new(vec![1, 2, 3], vec![4]).unwrap();
        let json = serde_json::to_value(&witness).unwrap();
        assert_eq!(json["invocation"], "AQID");
        assert_eq!(json["verification"], "BA==");
        let parsed: Witness = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, witness);
    }
}
