//! Standard verification contracts.

use crate::Result;
use neo_config::{ProtocolSettings, ADDRESS_VERSION};
use neo_core::UInt160;
use neo_cryptography::ECPoint;
use neo_vm::{ContractParameterType, ScriptBuilder};
use serde::{Deserialize, Serialize};

/// A verification script and the parameters its invocation script pushes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub script: Vec<u8>,
    pub parameter_list: Vec<ContractParameterType>,
}

impl Contract {
    pub fn new(script: Vec<u8>, parameter_list: Vec<ContractParameterType>) -> Self {
        Self {
            script,
            parameter_list,
        }
    }

    /// Single-signature contract of `public_key`.
    pub fn create_signature_contract(public_key: &ECPoint) -> Self {
        Self::new(
            ScriptBuilder::build_verification_script(public_key),
            vec![ContractParameterType::Signature],
        )
    }

    /// `threshold`-of-n contract over `public_keys`.
    pub fn create_multisig_contract(threshold: usize, public_keys: &[ECPoint]) -> Result<Self> {
        let script = ScriptBuilder::build_verification_script_multisig(threshold, public_keys)?;
        Ok(Self::new(
            script,
            vec![ContractParameterType::Signature; threshold],
        ))
    }

    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.script)
    }

    pub fn address(&self) -> String {
        self.address_with_version(ADDRESS_VERSION)
    }

    pub fn address_with_version(&self, version: u8) -> String {
        self.script_hash().to_address_with_version(version)
    }

    /// Address on the network described by `settings`.
    pub fn address_for(&self, settings: &ProtocolSettings) -> String {
        self.address_with_version(settings.address_version)
    }
}
