//! NEP-2 passphrase-protected private keys.
//!
//! The envelope is `Base58Check(0x01 0x42 0xE0 ‖ address_hash ‖ ciphertext)`
//! where `address_hash` is the first four bytes of the double SHA-256 of the
//! key's address and the ciphertext is
//! `AES-256-ECB(derived[32..64], key XOR derived[0..32])` with `derived`
//! the 64-byte scrypt output for the passphrase salted by `address_hash`.

use crate::key_pair::KeyPair;
use crate::scrypt_parameters::{ScryptParameters, DERIVED_KEY_LENGTH};
use crate::{Error, Result};
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;
use neo_config::HASH_SIZE;
use neo_cryptography::hash::hash256;
use neo_cryptography::{FromBase58Check, ToBase58Check};
use tracing::debug;
use zeroize::Zeroizing;

const NEP2_PREFIX: [u8; 3] = [0x01, 0x42, 0xE0];
const NEP2_SIZE: usize = 39;
const ADDRESS_HASH_SIZE: usize = 4;

/// Encrypts the private key of `key_pair`.
pub fn encrypt(
    key_pair: &KeyPair,
    passphrase: &str,
    version: u8,
    scrypt: &ScryptParameters,
) -> Result<String> {
    let address_hash = address_hash(&key_pair.address_with_version(version));
    let derived = derive_key(passphrase, &address_hash, scrypt)?;

    let mut block = Zeroizing::new([0u8; HASH_SIZE]);
    for (i, byte) in block.iter_mut().enumerate() {
        *byte = key_pair.private_key()[i] ^ derived[i];
    }
    let cipher = Aes256::new(GenericArray::from_slice(&derived[HASH_SIZE..]));
    for chunk in block.chunks_mut(16) {
        cipher.encrypt_block(GenericArray::from_mut_slice(chunk));
    }

    let mut envelope = Vec::with_capacity(NEP2_SIZE);
    envelope.extend_from_slice(&NEP2_PREFIX);
    envelope.extend_from_slice(&address_hash);
    envelope.extend_from_slice(&block[..]);
    debug!(n = scrypt.n, r = scrypt.r, p = scrypt.p, "NEP-2 key exported");
    Ok(envelope.to_base58_check())
}

/// Decrypts a NEP-2 envelope. A passphrase that does not reproduce the
/// stored address hash yields [`Error::InvalidPassword`].
pub fn decrypt(
    nep2: &str,
    passphrase: &str,
    version: u8,
    scrypt: &ScryptParameters,
) -> Result<KeyPair> {
    let data = Vec::<u8>::from_base58_check(nep2)
        .map_err(|e| Error::InvalidFormat(format!("NEP-2: {}", e)))?;
    if data.len() != NEP2_SIZE || data[..3] != NEP2_PREFIX {
        return Err(Error::InvalidFormat(
            "not a NEP-2 encrypted key".to_string(),
        ));
    }
    let stored_hash = &data[3..3 + ADDRESS_HASH_SIZE];
    let derived = derive_key(passphrase, stored_hash, scrypt)?;

    let mut block = Zeroizing::new([0u8; HASH_SIZE]);
    block.copy_from_slice(&data[3 + ADDRESS_HASH_SIZE..]);
    let cipher = Aes256::new(GenericArray::from_slice(&derived[HASH_SIZE..]));
    for chunk in block.chunks_mut(16) {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
    }
    for (byte, mask) in block.iter_mut().zip(derived.iter()) {
        *byte ^= mask;
    }

    let key_pair = KeyPair::from_private_key(&block[..]).map_err(|_| Error::InvalidPassword)?;
    let expected = address_hash(&key_pair.address_with_version(version));
    if stored_hash != &expected[..] {
        return Err(Error::InvalidPassword);
    }
    Ok(key_pair)
}

fn address_hash(address: &str) -> [u8; ADDRESS_HASH_SIZE] {
    let digest = hash256(address.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

fn derive_key(
    passphrase: &str,
    salt: &[u8],
    scrypt: &ScryptParameters,
) -> Result<Zeroizing<[u8; DERIVED_KEY_LENGTH]>> {
    let params = scrypt.to_scrypt_params()?;
    let mut derived = Zeroizing::new([0u8; DERIVED_KEY_LENGTH]);
    scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut derived[..])
        .map_err(|e| Error::Scrypt(e.to_string()))?;
    Ok(derived)
}
