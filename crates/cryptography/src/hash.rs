//! Hash functions for Neo cryptography.
//!
//! SHA-256, RIPEMD-160 and the Neo-specific combinations built from them.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes Hash160 (RIPEMD-160 of SHA-256) of the input data.
/// Script hashes and therefore addresses are Hash160 values.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Computes Hash256 (double SHA-256) of the input data.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// First four bytes of Hash256, as appended by Base58Check.
pub fn checksum(data: &[u8]) -> [u8; 4] {
    let digest = hash256(data);
    [digest[0], digest[1], digest[2], digest[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_ripemd160_abc() {
        assert_eq!(
            hex::encode(ripemd160(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn test_hash256_is_double_sha256() {
        let data = b"hello world";
        assert_eq!(hash256(data), sha256(&sha256(data)));
        assert_eq!(checksum(data), hash256(data)[..4]);
    }

    #[test]
    fn test_hash160_composition() {
        let data = b"neo";
        assert_eq!(hash160(data), ripemd160(&sha256(data)));
    }
}
