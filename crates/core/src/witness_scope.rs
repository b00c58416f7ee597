// Copyright (C) 2015-2025 The Neo Project.
//
// witness_scope.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witness scope flags.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Limits where a signer's witness may be used while a transaction executes.
///
/// Flags combine with `|`, except [`WitnessScope::GLOBAL`], which stands alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WitnessScope(u8);

impl WitnessScope {
    /// Only the transaction itself is signed.
    pub const NONE: WitnessScope = WitnessScope(0x00);
    /// The witness is valid only in the entry script and contracts it calls directly.
    pub const CALLED_BY_ENTRY: WitnessScope = WitnessScope(0x01);
    /// The witness is valid in the listed contracts.
    pub const CUSTOM_CONTRACTS: WitnessScope = WitnessScope(0x10);
    /// The witness is valid in contracts of the listed groups.
    pub const CUSTOM_GROUPS: WitnessScope = WitnessScope(0x20);
    /// The witness is valid wherever its rules allow.
    pub const WITNESS_RULES: WitnessScope = WitnessScope(0x40);
    /// The witness is valid everywhere.
    pub const GLOBAL: WitnessScope = WitnessScope(0x80);

    const ALL_FLAGS: u8 = 0x01 | 0x10 | 0x20 | 0x40 | 0x80;

    pub fn has_flag(self, flag: WitnessScope) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Parses a scope byte, rejecting unknown bits and Global mixed with
    /// anything else.
    pub fn from_byte(value: u8) -> CoreResult<Self> {
        let scope = WitnessScope(value);
        if scope.is_valid() {
            Ok(scope)
        } else {
            Err(CoreError::invalid_format(format!(
                "invalid witness scope 0x{:02x}",
                value
            )))
        }
    }

    pub fn is_valid(self) -> bool {
        if self.0 & !Self::ALL_FLAGS != 0 {
            return false;
        }
        !(self.has_flag(WitnessScope::GLOBAL) && self != WitnessScope::GLOBAL)
    }

    pub(crate) fn without(self, flag: WitnessScope) -> Self {
        WitnessScope(self.0 & !flag.0)
    }
}

impl BitOr for WitnessScope {
    type Output = WitnessScope;

    fn bitor(self, rhs: WitnessScope) -> WitnessScope {
        WitnessScope(self.0 | rhs.0)
    }
}

impl TryFrom<u8> for WitnessScope {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        Self::from_byte(value)
    }
}

impl From<WitnessScope> for u8 {
    fn from(scope: WitnessScope) -> u8 {
        scope.0
    }
}

impl fmt::Display for WitnessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(WitnessScope, &str); 5] = [
            (WitnessScope::CALLED_BY_ENTRY, "CalledByEntry"),
            (WitnessScope::CUSTOM_CONTRACTS, "CustomContracts"),
            (WitnessScope::CUSTOM_GROUPS, "CustomGroups"),
            (WitnessScope::WITNESS_RULES, "WitnessRules"),
            (WitnessScope::GLOBAL, "Global"),
        ];
        let parts: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.has_flag(*flag))
            .map(|(_, name)| *name)
            .collect();
        if parts.is_empty() {
            f.write_str("None")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}
