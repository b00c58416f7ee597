//! Base58 and Base58Check encoding (Bitcoin alphabet).
//!
//! Base58Check appends the first four bytes of the double SHA-256 of the
//! payload before encoding, and verifies them when decoding.

use crate::hash::checksum;
use crate::{Error, Result};

/// Encodes bytes as Base58. Leading zero bytes become leading `'1'`s.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decodes a Base58 string, rejecting characters outside the alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    bs58::decode(text)
        .into_vec()
        .map_err(|e| Error::InvalidBase58(e.to_string()))
}

pub trait ToBase58Check {
    fn to_base58_check(&self) -> String;
}

impl<T: AsRef<[u8]>> ToBase58Check for T {
    fn to_base58_check(&self) -> String {
        let src = self.as_ref();
        let mut buf = Vec::with_capacity(src.len() + 4);
        buf.extend_from_slice(src);
        buf.extend_from_slice(&checksum(src));
        encode(&buf)
    }
}

pub trait FromBase58Check: Sized {
    fn from_base58_check<T: AsRef<str>>(src: T) -> Result<Self>;
}

impl FromBase58Check for Vec<u8> {
    fn from_base58_check<T: AsRef<str>>(src: T) -> Result<Vec<u8>> {
        let mut decoded = decode(src.as_ref())?;
        if decoded.len() < 4 {
            return Err(Error::InvalidBase58("input too short for checksum".to_string()));
        }
        let payload_len = decoded.len() - 4;
        if checksum(&decoded[..payload_len]) != decoded[payload_len..] {
            return Err(Error::InvalidChecksum);
        }
        decoded.truncate(payload_len);
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b" "), "Z");
        assert_eq!(encode(&[0, 0, 1]), "112");
    }

    #[test]
    fn test_base58_check_vector() {
        let data = hex!("06a19f88226e21ee0e4f0eda850d6d28c2ec992c3d9dfe");
        let encoded = data.to_base58_check();
        assert_eq!(encoded, "tz1Y3qqTg9HdrzZGbEjiCPmwuZ7fWVxpPtRw");
        assert_eq!(Vec::<u8>::from_base58_check(&encoded).unwrap(), data.to_vec());
    }

    #[test]
    fn test_decode_rejects_forbidden_characters() {
        for text in ["0abc", "Oabc", "Iabc", "labc", "ab c"] {
            assert!(matches!(decode(text), Err(Error::InvalidBase58(_))), "{}", text);
        }
    }

    #[test]
    fn test_base58_check_bad_checksum() {
        let mut raw = b"neo".to_vec();
        raw.extend_from_slice(&[0, 0, 0, 0]);
        let forged = encode(&raw);
        assert_eq!(Vec::<u8>::from_base58_check(forged), Err(Error::InvalidChecksum));
    }

    #[test]
    fn test_base58_check_too_short() {
        assert!(Vec::<u8>::from_base58_check(encode(&[1, 2, 3])).is_err());
    }
}
