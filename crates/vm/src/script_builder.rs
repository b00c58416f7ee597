//! Script builder for NeoVM bytecode.
//!
//! Besides the generic `emit_*` primitives this module builds the standard
//! verification scripts (single and multi signature) and the invocation
//! scripts that satisfy them.

use crate::call_flags::CallFlags;
use crate::contract_parameter::ContractParameter;
use crate::error::{VmError, VmResult};
use crate::interop_service::InteropService;
use crate::op_code::OpCode;
use neo_config::MAX_MULTISIG_KEYS;
use neo_core::UInt160;
use neo_cryptography::{ECPoint, Signature};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::collections::BTreeSet;
use tracing::trace;

/// Helps construct VM scripts programmatically.
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            script: Vec::with_capacity(capacity),
        }
    }

    /// Emits a single raw byte.
    pub fn emit(&mut self, byte: u8) -> &mut Self {
        self.script.push(byte);
        self
    }

    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    /// Emits raw bytes without any push prefix.
    pub fn emit_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend_from_slice(bytes);
        self
    }

    /// Pushes an integer.
    ///
    /// -1 through 16 use their dedicated opcodes; anything else is pushed as
    /// its minimal little-endian two's-complement encoding in a PUSHDATA1.
    /// Builders that emit PUSHINT8..PUSHINT256 for these values produce
    /// different bytes, and so a different script hash, for the same script.
    pub fn emit_push_integer<T: Into<BigInt>>(&mut self, value: T) -> &mut Self {
        let value: BigInt = value.into();
        if let Some(op) = value.to_i64().and_then(OpCode::push_small_int) {
            return self.emit_opcode(op);
        }
        self.emit_push(&value.to_signed_bytes_le())
    }

    /// Pushes a byte string with the smallest PUSHDATA form that fits.
    pub fn emit_push(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= 0xFF {
            self.emit_opcode(OpCode::PUSHDATA1);
            self.emit(len as u8);
        } else if len <= 0xFFFF {
            self.emit_opcode(OpCode::PUSHDATA2);
            self.emit_raw(&(len as u16).to_le_bytes());
        } else {
            self.emit_opcode(OpCode::PUSHDATA4);
            self.emit_raw(&(len as u32).to_le_bytes());
        }
        self.emit_raw(data)
    }

    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        self.emit_opcode(if value { OpCode::PUSHT } else { OpCode::PUSHF })
    }

    pub fn emit_push_null(&mut self) -> &mut Self {
        self.emit_opcode(OpCode::PUSHNULL)
    }

    /// Pushes the UTF-8 bytes of `value`.
    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push(value.as_bytes())
    }

    /// Emits `SYSCALL` followed by the 4-byte service id.
    pub fn emit_syscall(&mut self, service: InteropService) -> &mut Self {
        self.emit_opcode(OpCode::SYSCALL);
        self.emit_raw(&service.hash_bytes())
    }

    /// Pushes a contract parameter, recursing into arrays and maps.
    pub fn emit_push_parameter(&mut self, parameter: &ContractParameter) -> VmResult<&mut Self> {
        match parameter {
            ContractParameter::Any => {
                self.emit_push_null();
            }
            ContractParameter::Boolean(value) => {
                self.emit_push_bool(*value);
            }
            ContractParameter::Integer(value) => {
                self.emit_push_integer(value.clone());
            }
            ContractParameter::ByteArray(value) => {
                self.emit_push(value);
            }
            ContractParameter::String(value) => {
                self.emit_push_string(value);
            }
            ContractParameter::Hash160(value) => {
                self.emit_push(value.as_bytes());
            }
            ContractParameter::Hash256(value) => {
                self.emit_push(value.as_bytes());
            }
            ContractParameter::PublicKey(value) => {
                self.emit_push(value.as_bytes());
            }
            ContractParameter::Signature(value) => {
                self.emit_push(value);
            }
            ContractParameter::Array(items) => {
                self.emit_push_array(items)?;
            }
            ContractParameter::Map(entries) => {
                if entries.is_empty() {
                    self.emit_opcode(OpCode::NEWMAP);
                } else {
                    for (key, value) in entries.iter().rev() {
                        if !key.is_primitive() {
                            return Err(VmError::invalid_argument(format!(
                                "map key of type {} is not allowed",
                                key.parameter_type()
                            )));
                        }
                        self.emit_push_parameter(value)?;
                        self.emit_push_parameter(key)?;
                    }
                    self.emit_push_integer(entries.len() as i64);
                    self.emit_opcode(OpCode::PACKMAP);
                }
            }
        }
        Ok(self)
    }

    /// Pushes `items` as an array: elements in reverse, the count, `PACK`.
    /// An empty array is `NEWARRAY0`.
    pub fn emit_push_array(&mut self, items: &[ContractParameter]) -> VmResult<&mut Self> {
        if items.is_empty() {
            return Ok(self.emit_opcode(OpCode::NEWARRAY0));
        }
        for item in items.iter().rev() {
            self.emit_push_parameter(item)?;
        }
        self.emit_push_integer(items.len() as i64);
        Ok(self.emit_opcode(OpCode::PACK))
    }

    /// Emits a `System.Contract.Call` of `method` on `script_hash` with
    /// [`CallFlags::ALL`].
    pub fn emit_app_call(
        &mut self,
        script_hash: &UInt160,
        method: &str,
        params: &[ContractParameter],
    ) -> VmResult<&mut Self> {
        self.emit_app_call_with_flags(script_hash, method, params, CallFlags::ALL)
    }

    pub fn emit_app_call_with_flags(
        &mut self,
        script_hash: &UInt160,
        method: &str,
        params: &[ContractParameter],
        flags: CallFlags,
    ) -> VmResult<&mut Self> {
        if method.is_empty() {
            return Err(VmError::invalid_argument("method name is empty"));
        }
        self.emit_push_array(params)?;
        self.emit_push_integer(flags.bits() as i64);
        self.emit_push_string(method);
        self.emit_push(script_hash.as_bytes());
        Ok(self.emit_syscall(InteropService::ContractCall))
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// A copy of the bytes emitted so far.
    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.script
    }

    /// `PUSHDATA1 <key> SYSCALL System.Crypto.CheckSig`.
    pub fn build_verification_script(public_key: &ECPoint) -> Vec<u8> {
        let mut builder = ScriptBuilder::with_capacity(40);
        builder
            .emit_push(public_key.as_bytes())
            .emit_syscall(InteropService::CryptoCheckSig);
        builder.into_bytes()
    }

    /// `threshold`-of-`n` verification script over `public_keys`.
    ///
    /// Keys are emitted in `ECPoint` order (X coordinate, then Y) whatever
    /// order they are passed in.
    pub fn build_verification_script_multisig(
        threshold: usize,
        public_keys: &[ECPoint],
    ) -> VmResult<Vec<u8>> {
        let sorted: BTreeSet<&ECPoint> = public_keys.iter().collect();
        if sorted.len() != public_keys.len() {
            return Err(VmError::invalid_argument("duplicate public key in multisig set"));
        }
        if public_keys.len() > MAX_MULTISIG_KEYS {
            return Err(VmError::invalid_argument(format!(
                "{} public keys exceed the limit of {}",
                public_keys.len(),
                MAX_MULTISIG_KEYS
            )));
        }
        if threshold == 0 || threshold > public_keys.len() {
            return Err(VmError::invalid_argument(format!(
                "threshold {} is not within 1..={}",
                threshold,
                public_keys.len()
            )));
        }

        let mut builder = ScriptBuilder::with_capacity(public_keys.len() * 35 + 8);
        builder.emit_push_integer(threshold as i64);
        for key in sorted {
            builder.emit_push(key.as_bytes());
        }
        builder
            .emit_push_integer(public_keys.len() as i64)
            .emit_syscall(InteropService::CryptoCheckMultisig);
        trace!(threshold, keys = public_keys.len(), "built multisig verification script");
        Ok(builder.into_bytes())
    }

    /// Pushes one signature.
    pub fn build_invocation_script(signature: &Signature) -> Vec<u8> {
        Self::build_invocation_script_multi(std::slice::from_ref(signature))
    }

    /// Pushes each signature in the order given.
    pub fn build_invocation_script_multi(signatures: &[Signature]) -> Vec<u8> {
        let mut builder = ScriptBuilder::with_capacity(signatures.len() * 66);
        for signature in signatures {
            builder.emit_push(&signature.to_bytes());
        }
        builder.into_bytes()
    }
}
