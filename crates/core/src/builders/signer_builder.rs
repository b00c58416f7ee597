// Copyright (C) 2015-2025 The Neo Project.
//
// signer_builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Builder for transaction signers.

use crate::{CoreResult, Signer, UInt160, WitnessRule, WitnessScope};
use neo_cryptography::ECPoint;

/// Collects a signer's account, scopes and sub-lists, validating them all
/// at [`SignerBuilder::build`].
#[derive(Debug, Default)]
pub struct SignerBuilder {
    account: UInt160,
    scopes: WitnessScope,
    allowed_contracts: Vec<UInt160>,
    allowed_groups: Vec<ECPoint>,
    rules: Vec<WitnessRule>,
}

impl SignerBuilder {
    pub fn create_empty() -> Self {
        Self::default()
    }

    pub fn account(mut self, script_hash: UInt160) -> Self {
        self.account = script_hash;
        self
    }

    pub fn allow_contract(mut self, contract_hash: UInt160) -> Self {
        self.allowed_contracts.push(contract_hash);
        self
    }

    pub fn allow_group(mut self, public_key: ECPoint) -> Self {
        self.allowed_groups.push(public_key);
        self
    }

    pub fn add_witness_scope(mut self, scope: WitnessScope) -> Self {
        self.scopes = self.scopes | scope;
        self
    }

    pub fn add_witness_rule(mut self, rule: WitnessRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds the signer. Fails on Global combined with other flags or
    /// sub-lists, on more than 16 entries in a sub-list, or on an invalid rule.
    pub fn build(self) -> CoreResult<Signer> {
        let base_scope = if self.scopes.has_flag(WitnessScope::GLOBAL) {
            WitnessScope::GLOBAL
        } else {
            self.scopes
        };
        let mut signer = Signer::new(self.account, base_scope)?;
        for contract in self.allowed_contracts {
            signer.add_allowed_contract(contract)?;
        }
        for group in self.allowed_groups {
            signer.add_allowed_group(group)?;
        }
        for rule in self.rules {
            signer.add_rule(rule)?;
        }
        signer.set_scopes(signer.scopes() | self.scopes)?;
        Ok(signer)
    }
}
