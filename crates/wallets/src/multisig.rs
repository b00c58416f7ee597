//! Threshold witness assembly.

use crate::{Error, Result};
use neo_core::{UInt160, Witness};
use neo_cryptography::{ECDsa, ECPoint, Signature};
use neo_vm::{parse_multisig_contract, ScriptBuilder};
use tracing::debug;

/// Collects signatures for an m-of-n account and builds its witness.
///
/// Signatures are slotted by the position of their key in the verification
/// script, so the invocation script always pushes them in script order no
/// matter the order they arrive in.
#[derive(Debug, Clone)]
pub struct MultisigWitnessBuilder {
    threshold: usize,
    public_keys: Vec<ECPoint>,
    verification_script: Vec<u8>,
    signatures: Vec<Option<Signature>>,
}

impl MultisigWitnessBuilder {
    pub fn new(threshold: usize, public_keys: &[ECPoint]) -> Result<Self> {
        let verification_script =
            ScriptBuilder::build_verification_script_multisig(threshold, public_keys)?;
        Self::from_verification_script(&verification_script)
    }

    /// Wraps an existing multi-signature script. The script is kept byte for
    /// byte, so the witness hashes to the same account.
    pub fn from_verification_script(script: &[u8]) -> Result<Self> {
        let (threshold, public_keys) = parse_multisig_contract(script).ok_or_else(|| {
            Error::InvalidArgument("not a multi-signature verification script".to_string())
        })?;
        Ok(Self {
            threshold,
            signatures: vec![None; public_keys.len()],
            public_keys,
            verification_script: script.to_vec(),
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The keys in script order.
    pub fn public_keys(&self) -> &[ECPoint] {
        &self.public_keys
    }

    pub fn verification_script(&self) -> &[u8] {
        &self.verification_script
    }

    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script)
    }

    pub fn signature_count(&self) -> usize {
        self.signatures.iter().flatten().count()
    }

    pub fn is_complete(&self) -> bool {
        self.signature_count() >= self.threshold
    }

    /// Records `signature` for `public_key`.
    ///
    /// Fails with a state error for a key outside the script and rejects a
    /// second signature from the same key.
    pub fn add_signature(&mut self, public_key: ECPoint, signature: Signature) -> Result<()> {
        let position = self
            .public_keys
            .iter()
            .position(|key| *key == public_key)
            .ok_or_else(|| {
                Error::state(format!(
                    "public key {} is not part of the multi-signature script",
                    public_key
                ))
            })?;
        let slot = &mut self.signatures[position];
        if slot.is_some() {
            return Err(Error::InvalidArgument(format!(
                "public key {} has already signed",
                public_key
            )));
        }
        *slot = Some(signature);
        debug!(
            signatures = self.signature_count(),
            threshold = self.threshold,
            "multi-signature share added"
        );
        Ok(())
    }

    /// Like [`MultisigWitnessBuilder::add_signature`], but first checks that
    /// `signature` is valid for `message` under `public_key`.
    pub fn verify_and_add(
        &mut self,
        message: &[u8],
        public_key: ECPoint,
        signature: Signature,
    ) -> Result<()> {
        if !ECDsa::verify(message, &signature, &public_key) {
            return Err(Error::Cryptography(
                neo_cryptography::Error::InvalidSignature(format!(
                    "signature does not verify under {}",
                    public_key
                )),
            ));
        }
        self.add_signature(public_key, signature)
    }

    /// Builds the witness from the first `threshold` signatures in script order.
    pub fn build(&self) -> Result<Witness> {
        if !self.is_complete() {
            return Err(Error::InsufficientSignatures {
                required: self.threshold,
                provided: self.signature_count(),
            });
        }
        let signatures: Vec<Signature> = self
            .signatures
            .iter()
            .flatten()
            .take(self.threshold)
            .copied()
            .collect();
        let invocation = ScriptBuilder::build_invocation_script_multi(&signatures);
        Ok(Witness::new(invocation, self.verification_script.clone())?)
    }
}
