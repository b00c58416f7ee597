//! secp256r1 key pairs.

use crate::scrypt_parameters::ScryptParameters;
use crate::{nep2, wif, Error, Result};
use neo_config::{ProtocolSettings, ADDRESS_VERSION, HASH_SIZE};
use neo_core::UInt160;
use neo_cryptography::ecc::COMPRESSED_SIZE;
use neo_cryptography::{ECDsa, ECPoint, Signature};
use neo_vm::ScriptBuilder;
use std::fmt;
use tracing::{trace, warn};
use zeroize::Zeroizing;

/// A private key and the public key derived from it.
///
/// The private key is wiped from memory when the pair is dropped. Two pairs
/// are equal when their public keys are.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<[u8; HASH_SIZE]>,
    public_key: ECPoint,
}

impl KeyPair {
    /// Generates a key pair from the operating system's random source.
    pub fn generate() -> Result<Self> {
        let private_key = Zeroizing::new(ECDsa::generate_private_key());
        Self::from_private_key(&private_key[..])
    }

    /// Creates a key pair from a 32-byte private key.
    ///
    /// Fails unless the key is a scalar in `1..n` for the curve order `n`.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        if !ECDsa::validate_private_key(private_key) {
            return Err(Error::InvalidArgument(
                "private key must be a 32-byte scalar in 1..n".to_string(),
            ));
        }
        let public_key = ECDsa::derive_public_key(private_key)?;
        let mut key = Zeroizing::new([0u8; HASH_SIZE]);
        key.copy_from_slice(private_key);
        Ok(Self {
            private_key: key,
            public_key,
        })
    }

    pub fn private_key(&self) -> &[u8; HASH_SIZE] {
        &self.private_key
    }

    pub fn public_key(&self) -> &ECPoint {
        &self.public_key
    }

    pub fn compressed_public_key(&self) -> [u8; COMPRESSED_SIZE] {
        self.public_key.encode_point()
    }

    /// The single-signature verification script of this key.
    pub fn verification_script(&self) -> Vec<u8> {
        ScriptBuilder::build_verification_script(&self.public_key)
    }

    /// Hash160 of [`KeyPair::verification_script`].
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script())
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

    /// Signs SHA-256(`message`), returning a low-S recoverable signature.
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let signature = ECDsa::sign(message, &self.private_key[..])?;
        trace!(public_key = %self.public_key, "message signed");
        Ok(signature)
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        ECDsa::verify(message, signature, &self.public_key)
    }

    pub fn export_wif(&self) -> String {
        wif::encode(&self.private_key)
    }

    pub fn from_wif(wif: &str) -> Result<Self> {
        let private_key = wif::decode(wif).map_err(|e| {
            warn!(error = %e, "rejected WIF import");
            e
        })?;
        Self::from_private_key(&private_key[..])
    }

    /// Encrypts the private key with `passphrase` (NEP-2).
    pub fn export_nep2(
        &self,
        passphrase: &str,
        version: u8,
        scrypt: &ScryptParameters,
    ) -> Result<String> {
        nep2::encrypt(self, passphrase, version, scrypt)
    }

    /// Decrypts a NEP-2 envelope.
    pub fn from_nep2(
        nep2: &str,
        passphrase: &str,
        version: u8,
        scrypt: &ScryptParameters,
    ) -> Result<Self> {
        nep2::decrypt(nep2, passphrase, version, scrypt).map_err(|e| {
            warn!(error = %e, "rejected NEP-2 import");
            e
        })
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
