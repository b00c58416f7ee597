//! # Neo VM
//!
//! NeoVM opcodes and script assembly for the Neo N3 SDK.
//!
//! This crate does not execute scripts. It emits the bytecode a client
//! needs: contract invocations, verification scripts for single and
//! multi-signature accounts and the invocation scripts that satisfy them.
//!
//! ## Example
//!
//! ```rust
//! use neo_vm::{ContractParameter, ScriptBuilder};
//! use neo_core::UInt160;
//!
//! let mut builder = ScriptBuilder::new();
//! builder
//!     .emit_app_call(&UInt160::zero(), "balanceOf", &[ContractParameter::from(UInt160::zero())])
//!     .unwrap();
//! assert!(!builder.is_empty());
//! ```

pub mod call_flags;
pub mod contract_parameter;
pub mod contract_script;
pub mod error;
pub mod interop_service;
pub mod op_code;
pub mod script_builder;

pub use call_flags::CallFlags;
pub use contract_parameter::{ContractParameter, ContractParameterType};
pub use contract_script::{
    is_multisig_contract, is_signature_contract, parse_multisig_contract,
    parse_signature_contract,
};
pub use error::{VmError, VmResult};
pub use interop_service::InteropService;
pub use op_code::OpCode;
pub use script_builder::ScriptBuilder;
