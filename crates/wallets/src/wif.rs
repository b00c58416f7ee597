//! Wallet Import Format for private keys.
//!
//! `Base58Check(0x80 ‖ key ‖ 0x01)`; the trailing byte marks a compressed
//! public key and is the only form Neo accepts.

use crate::{Error, Result};
use neo_config::HASH_SIZE;
use neo_cryptography::{FromBase58Check, ToBase58Check};
use zeroize::{Zeroize, Zeroizing};

const WIF_VERSION: u8 = 0x80;
const COMPRESSED_FLAG: u8 = 0x01;
const WIF_PAYLOAD_SIZE: usize = 1 + HASH_SIZE + 1;

/// Encodes a 32-byte private key as WIF.
pub fn encode(private_key: &[u8; HASH_SIZE]) -> String {
    let mut data = Zeroizing::new([0u8; WIF_PAYLOAD_SIZE]);
    data[0] = WIF_VERSION;
    data[1..=HASH_SIZE].copy_from_slice(private_key);
    data[WIF_PAYLOAD_SIZE - 1] = COMPRESSED_FLAG;
    let payload: &[u8] = &data[..];
    payload.to_base58_check()
}

/// Decodes a WIF string into the private key.
pub fn decode(wif: &str) -> Result<Zeroizing<[u8; HASH_SIZE]>> {
    let mut data = Vec::<u8>::from_base58_check(wif)
        .map_err(|e| Error::InvalidFormat(format!("WIF: {}", e)))?;
    let result = parse_payload(&data);
    data.zeroize();
    result
}

fn parse_payload(data: &[u8]) -> Result<Zeroizing<[u8; HASH_SIZE]>> {
    if data.len() != WIF_PAYLOAD_SIZE {
        return Err(Error::InvalidFormat(format!(
            "WIF payload is {} bytes, expected {}",
            data.len(),
            WIF_PAYLOAD_SIZE
        )));
    }
    if data[0] != WIF_VERSION {
        return Err(Error::InvalidFormat(format!(
            "WIF version 0x{:02x}, expected 0x80",
            data[0]
        )));
    }
    if data[WIF_PAYLOAD_SIZE - 1] != COMPRESSED_FLAG {
        return Err(Error::InvalidFormat(
            "WIF does not mark a compressed key".to_string(),
        ));
    }
    let mut key = Zeroizing::new([0u8; HASH_SIZE]);
    key.copy_from_slice(&data[1..=HASH_SIZE]);
    Ok(key)
}
