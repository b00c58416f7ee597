// Copyright (C) 2015-2025 The Neo Project.
//
// witness_rule.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witness rules: allow/deny decisions over a boolean condition tree.

use crate::UInt160;
use neo_config::{ADDRESS_SIZE, MAX_SUBITEMS};
use neo_cryptography::ECPoint;
use neo_io::serializable::helper::get_var_size;
use neo_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

/// The action taken when a rule's condition matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WitnessRuleAction {
    Deny = 0,
    Allow = 1,
}

impl WitnessRuleAction {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Deny),
            1 => Some(Self::Allow),
            _ => None,
        }
    }
}

/// Condition tree evaluated by the network when a witness is checked.
///
/// JSON uses the node RPC field names (`type`, `expression`, `expressions`,
/// `hash`, `group`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WitnessCondition {
    Boolean { expression: bool },
    Not { expression: Box<WitnessCondition> },
    And { expressions: Vec<WitnessCondition> },
    Or { expressions: Vec<WitnessCondition> },
    ScriptHash { hash: UInt160 },
    Group { group: ECPoint },
    CalledByEntry,
    CalledByContract { hash: UInt160 },
    CalledByGroup { group: ECPoint },
}

impl WitnessCondition {
    /// Levels a condition tree may have, the root included.
    pub const MAX_NESTING_DEPTH: usize = 3;

    pub fn type_byte(&self) -> u8 {
        match self {
            WitnessCondition::Boolean { .. } => 0x00,
            WitnessCondition::Not { .. } => 0x01,
            WitnessCondition::And { .. } => 0x02,
            WitnessCondition::Or { .. } => 0x03,
            WitnessCondition::ScriptHash { .. } => 0x18,
            WitnessCondition::Group { .. } => 0x19,
            WitnessCondition::CalledByEntry => 0x20,
            WitnessCondition::CalledByContract { .. } => 0x28,
            WitnessCondition::CalledByGroup { .. } => 0x29,
        }
    }

    /// Checks nesting depth and sub-item counts.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Self::MAX_NESTING_DEPTH)
    }

    fn is_valid_at(&self, depth: usize) -> bool {
        if depth == 0 {
            return false;
        }
        match self {
            WitnessCondition::Not { expression } => expression.is_valid_at(depth - 1),
            WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
                !expressions.is_empty()
                    && expressions.len() <= MAX_SUBITEMS
                    && expressions.iter().all(|c| c.is_valid_at(depth - 1))
            }
            _ => true,
        }
    }

    fn deserialize_with_depth(reader: &mut MemoryReader, depth: usize) -> IoResult<Self> {
        if depth == 0 {
            return Err(IoError::invalid_data("Witness condition nested too deeply"));
        }
        let condition = match reader.read_u8()? {
            0x00 => WitnessCondition::Boolean {
                expression: reader.read_bool()?,
            },
            0x01 => WitnessCondition::Not {
                expression: Box::new(Self::deserialize_with_depth(reader, depth - 1)?),
            },
            kind @ (0x02 | 0x03) => {
                let count = reader.read_var_int(MAX_SUBITEMS as u64)? as usize;
                if count == 0 {
                    return Err(IoError::invalid_data("Empty composite witness condition"));
                }
                let mut expressions = Vec::with_capacity(count);
                for _ in 0..count {
                    expressions.push(Self::deserialize_with_depth(reader, depth - 1)?);
                }
                if kind == 0x02 {
                    WitnessCondition::And { expressions }
                } else {
                    WitnessCondition::Or { expressions }
                }
            }
            0x18 => WitnessCondition::ScriptHash {
                hash: <UInt160 as Serializable>::deserialize(reader)?,
            },
            0x19 => WitnessCondition::Group {
                group: <ECPoint as Serializable>::deserialize(reader)?,
            },
            0x20 => WitnessCondition::CalledByEntry,
            0x28 => WitnessCondition::CalledByContract {
                hash: <UInt160 as Serializable>::deserialize(reader)?,
            },
            0x29 => WitnessCondition::CalledByGroup {
                group: <ECPoint as Serializable>::deserialize(reader)?,
            },
            other => {
                return Err(IoError::invalid_data(format!(
                    "Unknown witness condition type 0x{:02x}",
                    other
                )))
            }
        };
        Ok(condition)
    }
}

impl Serializable for WitnessCondition {
    fn size(&self) -> usize {
        let payload = match self {
            WitnessCondition::Boolean { .. } => 1,
            WitnessCondition::Not { expression } => expression.size(),
            WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
                get_var_size(expressions.len() as u64)
                    + expressions.iter().map(Serializable::size).sum::<usize>()
            }
            WitnessCondition::ScriptHash { .. } | WitnessCondition::CalledByContract { .. } => {
                ADDRESS_SIZE
            }
            WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } => {
                group.size()
            }
            WitnessCondition::CalledByEntry => 0,
        };
        1 + payload
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.type_byte())?;
        match self {
            WitnessCondition::Boolean { expression } => writer.write_bool(*expression),
            WitnessCondition::Not { expression } => {
                Serializable::serialize(expression.as_ref(), writer)
            }
            WitnessCondition::And { expressions } | WitnessCondition::Or { expressions } => {
                writer.write_var_int(expressions.len() as u64)?;
                for expression in expressions {
                    Serializable::serialize(expression, writer)?;
                }
                Ok(())
            }
            WitnessCondition::ScriptHash { hash } | WitnessCondition::CalledByContract { hash } => {
                Serializable::serialize(hash, writer)
            }
            WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } => {
                Serializable::serialize(group, writer)
            }
            WitnessCondition::CalledByEntry => Ok(()),
        }
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Self::deserialize_with_depth(reader, Self::MAX_NESTING_DEPTH)
    }
}

/// A rule in a signer's `WitnessRules` scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRule {
    pub action: WitnessRuleAction,
    pub condition: WitnessCondition,
}

impl WitnessRule {
    pub fn new(action: WitnessRuleAction, condition: WitnessCondition) -> Self {
        Self { action, condition }
    }
}

impl Serializable for WitnessRule {
    fn size(&self) -> usize {
        1 + self.condition.size()
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.action.to_byte())?;
        Serializable::serialize(&self.condition, writer)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let byte = reader.read_u8()?;
        let action = WitnessRuleAction::from_byte(byte).ok_or_else(|| {
            IoError::invalid_data(format!("Invalid witness rule action 0x{:02x}", byte))
        })?;
        let condition = <WitnessCondition as Serializable>::deserialize(reader)?;
        Ok(Self { action, condition })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::SerializableExt;

    fn nested(levels: usize) -> WitnessCondition {
        let mut condition = WitnessCondition::Boolean { expression: true };
        for _ in 1..levels {
            condition = WitnessCondition::Not {
                expression: Box::new(condition),
            };
        }
        condition
    }

    #[test]
    fn test_rule_wire_form() {
        let rule = WitnessRule::new(
            WitnessRuleAction::Allow,
            WitnessCondition::And {
                expressions: vec![
                    WitnessCondition::CalledByEntry,
                    WitnessCondition::Boolean { expression: false },
                ],
            },
        );
        let bytes = rule.to_array().unwrap();
        assert_eq!(bytes, vec![0x01, 0x02, 0x02, 0x20, 0x00, 0x00]);
        assert_eq!(bytes.len(), rule.size());
        assert_eq!(WitnessRule::from_array(&bytes).unwrap(), rule);
    }

    #[test]
    fn test_script_hash_condition() {
        let condition = WitnessCondition::ScriptHash {
            hash: UInt160::new([0xab; 20]),
        };
        let bytes = condition.to_array().unwrap();
        assert_eq!(bytes[0], 0x18);
        assert_eq!(bytes.len(), 21);
    }

    #[test]
    fn test_typed_payloads_round_trip() {
        let group: ECPoint = "026ff03b949241ce1dadd43519e6960e0a85b41a69a05c328103aa2bce1594ca16"
            .parse()
            .unwrap();
        let rule = WitnessRule::new(
            WitnessRuleAction::Deny,
            WitnessCondition::Or {
                expressions: vec![
                    WitnessCondition::Not {
                        expression: Box::new(WitnessCondition::Group { group }),
                    },
                    WitnessCondition::CalledByContract {
                        hash: UInt160::new([0x42; 20]),
                    },
                    WitnessCondition::CalledByGroup { group },
                ],
            },
        );
        let bytes = rule.to_array().unwrap();
        assert_eq!(&bytes[..4], &[0x00, 0x03, 0x03, 0x01]);
        assert_eq!(bytes[4], 0x19);
        assert_eq!(&bytes[5..38], group.as_bytes());
        assert_eq!(bytes.len(), rule.size());
        assert_eq!(WitnessRule::from_array(&bytes).unwrap(), rule);
    }

    #[test]
    fn test_nesting_limit() {
        assert!(nested(3).is_valid());
        assert!(!nested(4).is_valid());

        let too_deep = nested(4).to_array().unwrap();
        assert!(WitnessCondition::from_array(&too_deep).is_err());
        let ok = nested(3).to_array().unwrap();
        assert_eq!(WitnessCondition::from_array(&ok).unwrap(), nested(3));
    }

    #[test]
    fn test_empty_composite_rejected() {
        assert!(!WitnessCondition::Or { expressions: vec![] }.is_valid());
        assert!(WitnessCondition::from_array(&[0x03, 0x00]).is_err());
    }

    #[test]
    fn test_unknown_action_and_type() {
        assert!(WitnessRule::from_array(&[0x02, 0x20]).is_err());
        assert!(WitnessCondition::from_array(&[0x04]).is_err());
    }

    #[test]
    fn test_json_shape() {
        let rule = WitnessRule::new(WitnessRuleAction::Deny, WitnessCondition::CalledByEntry);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["action"], "Deny");
        assert_eq!(json["condition"]["type"], "CalledByEntry");
    }
}
