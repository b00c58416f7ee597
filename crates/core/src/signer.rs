// Copyright (C) 2015-2025 The Neo Project.
//
// signer.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction signers and their witness scopes.

use crate::witness_rule::WitnessRule;
use crate::{CoreError, CoreResult, UInt160, WitnessScope};
use neo_config::{ADDRESS_SIZE, MAX_SUBITEMS};
use neo_cryptography::ECPoint;
use neo_io::serializable::helper::{get_array_size, get_var_size};
use neo_io::{helper, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use serde::Serialize;

/// An account that must witness a transaction, and where that witness applies.
///
/// The sub-lists can only be changed through methods that keep the scope
/// consistent: adding an entry turns on the matching scope flag, and Global
/// excludes every sub-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signer {
    account: UInt160,
    scopes: WitnessScope,
    #[serde(rename = "allowedcontracts")]
    allowed_contracts: Vec<UInt160>,
    #[serde(rename = "allowedgroups")]
    allowed_groups: Vec<ECPoint>,
    rules: Vec<WitnessRule>,
}

impl Signer {
    /// Creates a signer with empty sub-lists.
    pub fn new(account: UInt160, scopes: WitnessScope) -> CoreResult<Self> {
        if !scopes.is_valid() {
            return Err(CoreError::invalid_argument(format!(
                "invalid witness scope 0x{:02x}",
                scopes.to_byte()
            )));
        }
        Ok(Self {
            account,
            scopes,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        })
    }

    pub fn called_by_entry(account: UInt160) -> Self {
        Self::with_valid_scope(account, WitnessScope::CALLED_BY_ENTRY)
    }

    pub fn global(account: UInt160) -> Self {
        Self::with_valid_scope(account, WitnessScope::GLOBAL)
    }

    pub fn none(account: UInt160) -> Self {
        Self::with_valid_scope(account, WitnessScope::NONE)
    }

    fn with_valid_scope(account: UInt160, scopes: WitnessScope) -> Self {
        Self {
            account,
            scopes,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn account(&self) -> &UInt160 {
        &self.account
    }

    pub fn scopes(&self) -> WitnessScope {
        self.scopes
    }

    pub fn allowed_contracts(&self) -> &[UInt160] {
        &self.allowed_contracts
    }

    pub fn allowed_groups(&self) -> &[ECPoint] {
        &self.allowed_groups
    }

    pub fn rules(&self) -> &[WitnessRule] {
        &self.rules
    }

    /// Replaces the scope flags.
    ///
    /// Global is rejected while any sub-list is populated, and a flag cannot
    /// be dropped while its sub-list still has entries.
    pub fn set_scopes(&mut self, scopes: WitnessScope) -> CoreResult<()> {
        if !scopes.is_valid() {
            return Err(CoreError::invalid_argument(format!(
                "invalid witness scope 0x{:02x}",
                scopes.to_byte()
            )));
        }
        let populated = [
            (!self.allowed_contracts.is_empty(), WitnessScope::CUSTOM_CONTRACTS),
            (!self.allowed_groups.is_empty(), WitnessScope::CUSTOM_GROUPS),
            (!self.rules.is_empty(), WitnessScope::WITNESS_RULES),
        ];
        for (non_empty, flag) in populated {
            if non_empty && !scopes.has_flag(flag) {
                return Err(CoreError::state(format!(
                    "scope {} conflicts with populated {} list",
                    scopes, flag
                )));
            }
        }
        self.scopes = scopes;
        Ok(())
    }

    /// Allows the witness inside `contract`.
    pub fn add_allowed_contract(&mut self, contract: UInt160) -> CoreResult<()> {
        self.check_can_add(self.allowed_contracts.len(), "allowed contracts")?;
        self.allowed_contracts.push(contract);
        self.scopes = self.scopes | WitnessScope::CUSTOM_CONTRACTS;
        Ok(())
    }

    /// Allows the witness inside contracts of the group identified by `group`.
    pub fn add_allowed_group(&mut self, group: ECPoint) -> CoreResult<()> {
        self.check_can_add(self.allowed_groups.len(), "allowed groups")?;
        self.allowed_groups.push(group);
        self.scopes = self.scopes | WitnessScope::CUSTOM_GROUPS;
        Ok(())
    }

    pub fn add_rule(&mut self, rule: WitnessRule) -> CoreResult<()> {
        if !rule.condition.is_valid() {
            return Err(CoreError::invalid_argument(
                "witness condition exceeds nesting or sub-item limits",
            ));
        }
        self.check_can_add(self.rules.len(), "witness rules")?;
        self.rules.push(rule);
        self.scopes = self.scopes | WitnessScope::WITNESS_RULES;
        Ok(())
    }

    fn check_can_add(&self, current: usize, list: &str) -> CoreResult<()> {
        if self.scopes.has_flag(WitnessScope::GLOBAL) {
            return Err(CoreError::state(format!(
                "cannot add {} to a signer with Global scope",
                list
            )));
        }
        if current >= MAX_SUBITEMS {
            return Err(CoreError::invalid_size(format!(
                "{} are limited to {} entries",
                list, MAX_SUBITEMS
            )));
        }
        Ok(())
    }

    /// Drops the CalledByEntry flag, keeping everything else.
    pub fn remove_called_by_entry(&mut self) {
        self.scopes = self.scopes.without(WitnessScope::CALLED_BY_ENTRY);
    }
}

impl Serializable for Signer {
    fn size(&self) -> usize {
        let mut size = ADDRESS_SIZE + 1;
        if self.scopes.has_flag(WitnessScope::CUSTOM_CONTRACTS) {
            size += get_array_size(&self.allowed_contracts);
        }
        if self.scopes.has_flag(WitnessScope::CUSTOM_GROUPS) {
            size += get_array_size(&self.allowed_groups);
        }
        if self.scopes.has_flag(WitnessScope::WITNESS_RULES) {
            size += get_var_size(self.rules.len() as u64)
                + self.rules.iter().map(Serializable::size).sum::<usize>();
        }
        size
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        Serializable::serialize(&self.account, writer)?;
        writer.write_u8(self.scopes.to_byte())?;
        if self.scopes.has_flag(WitnessScope::CUSTOM_CONTRACTS) {
            helper::serialize_array(&self.allowed_contracts, writer)?;
        }
        if self.scopes.has_flag(WitnessScope::CUSTOM_GROUPS) {
            helper::serialize_array(&self.allowed_groups, writer)?;
        }
        if self.scopes.has_flag(WitnessScope::WITNESS_RULES) {
            helper::serialize_array(&self.rules, writer)?;
        }
        Ok(())
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let account = <UInt160 as Serializable>::deserialize(reader)?;
        let scopes = WitnessScope::from_byte(reader.read_u8()?)
            .map_err(|e| IoError::invalid_data(e.to_string()))?;
        let allowed_contracts = if scopes.has_flag(WitnessScope::CUSTOM_CONTRACTS) {
            helper::deserialize_array(reader, MAX_SUBITEMS)?
        } else {
            Vec::new()
        };
        let allowed_groups = if scopes.has_flag(WitnessScope::CUSTOM_GROUPS) {
            helper::deserialize_array(reader, MAX_SUBITEMS)?
        } else {
            Vec::new()
        };
        let rules = if scopes.has_flag(WitnessScope::WITNESS_RULES) {
            helper::deserialize_array(reader, MAX_SUBITEMS)?
        } else {
            Vec::new()
        };
        Ok(Self {
            account,
            scopes,
            allowed_contracts,
            allowed_groups,
            rules,
        })
    }
}
