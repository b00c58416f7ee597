//! Typed arguments for contract invocations.

use neo_core::{UInt160, UInt256};
use neo_cryptography::ECPoint;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameter type codes used in contract manifests and RPC payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ContractParameterType {
    Any = 0x00,
    Boolean = 0x10,
    Integer = 0x11,
    ByteArray = 0x12,
    String = 0x13,
    Hash160 = 0x14,
    Hash256 = 0x15,
    PublicKey = 0x16,
    Signature = 0x17,
    Array = 0x20,
    Map = 0x22,
    InteropInterface = 0x30,
    Void = 0xff,
}

impl fmt::Display for ContractParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A value to push as a contract call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractParameter {
    /// Pushed as `PUSHNULL`.
    Any,
    Boolean(bool),
    Integer(BigInt),
    ByteArray(Vec<u8>),
    String(String),
    Hash160(UInt160),
    Hash256(UInt256),
    PublicKey(ECPoint),
    Signature([u8; 64]),
    Array(Vec<ContractParameter>),
    /// Key/value pairs in insertion order. Keys must be primitive values.
    Map(Vec<(ContractParameter, ContractParameter)>),
}

impl ContractParameter {
    pub fn parameter_type(&self) -> ContractParameterType {
        match self {
            ContractParameter::Any => ContractParameterType::Any,
            ContractParameter::Boolean(_) => ContractParameterType::Boolean,
            ContractParameter::Integer(_) => ContractParameterType::Integer,
            ContractParameter::ByteArray(_) => ContractParameterType::ByteArray,
            ContractParameter::String(_) => ContractParameterType::String,
            ContractParameter::Hash160(_) => ContractParameterType::Hash160,
            ContractParameter::Hash256(_) => ContractParameterType::Hash256,
            ContractParameter::PublicKey(_) => ContractParameterType::PublicKey,
            ContractParameter::Signature(_) => ContractParameterType::Signature,
            ContractParameter::Array(_) => ContractParameterType::Array,
            ContractParameter::Map(_) => ContractParameterType::Map,
        }
    }

    /// Whether the value can be used as a map key.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            ContractParameter::Any | ContractParameter::Array(_) | ContractParameter::Map(_)
        )
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        ContractParameter::Integer(value.into())
    }
}

impl From<bool> for ContractParameter {
    fn from(value: bool) -> Self {
        ContractParameter::Boolean(value)
    }
}

impl From<i64> for ContractParameter {
    fn from(value: i64) -> Self {
        ContractParameter::Integer(value.into())
    }
}

impl From<BigInt> for ContractParameter {
    fn from(value: BigInt) -> Self {
        ContractParameter::Integer(value)
    }
}

impl From<&str> for ContractParameter {
    fn from(value: &str) -> Self {
        ContractParameter::String(value.to_string())
    }
}

impl From<String> for ContractParameter {
    fn from(value: String) -> Self {
        ContractParameter::String(value)
    }
}

impl From<Vec<u8>> for ContractParameter {
    fn from(value: Vec<u8>) -> Self {
        ContractParameter::ByteArray(value)
    }
}

impl From<UInt160> for ContractParameter {
    fn from(value: UInt160) -> Self {
        ContractParameter::Hash160(value)
    }
}

impl From<UInt256> for ContractParameter {
    fn from(value: UInt256) -> Self {
        ContractParameter::Hash256(value)
    }
}

impl From<ECPoint> for ContractParameter {
    fn from(value: ECPoint) -> Self {
        ContractParameter::PublicKey(value)
    }
}

impl From<Vec<ContractParameter>> for ContractParameter {
    fn from(value: Vec<ContractParameter>) -> Self {
        ContractParameter::Array(value)
    }
}

impl fmt::Display for ContractParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractParameter::Any => f.write_str("null"),
            ContractParameter::Boolean(value) => write!(f, "{}", value),
            ContractParameter::Integer(value) => write!(f, "{}", value),
            ContractParameter::ByteArray(value) => write!(f, "{}", hex::encode(value)),
            ContractParameter::String(value) => f.write_str(value),
            ContractParameter::Hash160(value) => write!(f, "{}", value),
            ContractParameter::Hash256(value) => write!(f, "{}", value),
            ContractParameter::PublicKey(value) => write!(f, "{}", value),
            ContractParameter::Signature(value) => write!(f, "{}", hex::encode(value)),
            ContractParameter::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ContractParameter::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}
