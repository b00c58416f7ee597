//! ECDSA over secp256r1 with public key recovery.
//!
//! Messages are hashed once with SHA-256 and signed deterministically
//! (RFC 6979). Signatures are normalized to low-S and carry the recovery id
//! of the nonce point so the signer's key can be recovered from
//! `(message, signature)` alone.

use crate::ecc::ECPoint;
use crate::hash::sha256;
use crate::{Error, Result};
use neo_config::HASH_SIZE;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::ecdsa::{Signature as P256Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{AffinePoint, EncodedPoint, FieldBytes, NistP256, ProjectivePoint, Scalar, SecretKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Size of the `r ‖ s` wire form.
pub const SIGNATURE_SIZE: usize = 64;

/// A recoverable ECDSA signature.
///
/// `r` and `s` are big-endian scalars, `s` is always in the lower half of the
/// curve order and `v` is the y-parity (0 or 1) of the nonce point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    r: [u8; HASH_SIZE],
    s: [u8; HASH_SIZE],
    v: u8,
}

impl Signature {
    pub fn new(r: [u8; HASH_SIZE], s: [u8; HASH_SIZE], v: u8) -> Result<Self> {
        if v > 3 {
            return Err(Error::InvalidSignature(format!("recovery id {} out of range", v)));
        }
        Ok(Self { r, s, v })
    }

    /// Parses the 64-byte `r ‖ s` form. The recovery id defaults to 0.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != SIGNATURE_SIZE {
            return Err(Error::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_SIZE,
                data.len()
            )));
        }
        let mut r = [0u8; HASH_SIZE];
        let mut s = [0u8; HASH_SIZE];
        r.copy_from_slice(&data[..HASH_SIZE]);
        s.copy_from_slice(&data[HASH_SIZE..]);
        Ok(Self { r, s, v: 0 })
    }

    pub fn r(&self) -> &[u8; HASH_SIZE] {
        &self.r
    }

    pub fn s(&self) -> &[u8; HASH_SIZE] {
        &self.s
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    /// The network wire form `r ‖ s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        out[..HASH_SIZE].copy_from_slice(&self.r);
        out[HASH_SIZE..].copy_from_slice(&self.s);
        out
    }

    /// Whether `s` lies in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.to_p256()
            .map(|sig| sig.normalize_s().is_none())
            .unwrap_or(false)
    }

    fn to_p256(&self) -> Result<P256Signature> {
        P256Signature::from_slice(&self.to_bytes())
            .map_err(|e| Error::InvalidSignature(e.to_string()))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &hex::encode(self.r))
            .field("s", &hex::encode(self.s))
            .field("v", &self.v)
            .finish()
    }
}

/// ECDSA implementation for Neo blockchain.
pub struct ECDsa;

impl ECDsa {
    /// Generates a new random private key.
    pub fn generate_private_key() -> [u8; HASH_SIZE] {
        let secret_key = SecretKey::random(&mut OsRng);
        secret_key.to_bytes().into()
    }

    /// Validates a private key: 32 bytes, non-zero and below the curve order.
    pub fn validate_private_key(private_key: &[u8]) -> bool {
        private_key.len() == HASH_SIZE && SecretKey::from_slice(private_key).is_ok()
    }

    /// Derives the public key from a private key.
    pub fn derive_public_key(private_key: &[u8]) -> Result<ECPoint> {
        let secret_key = Self::secret_key(private_key)?;
        Ok(ECPoint::from_public_key(&secret_key.public_key()))
    }

    /// Signs `message` (hashed with SHA-256) with the given private key.
    pub fn sign(message: &[u8], private_key: &[u8]) -> Result<Signature> {
        let secret_key = Self::secret_key(private_key)?;
        let public_key = ECPoint::from_public_key(&secret_key.public_key());
        let digest = sha256(message);

        let signing_key = SigningKey::from(&secret_key);
        let signature: P256Signature = signing_key
            .sign_prehash(&digest)
            .map_err(|e| Error::SigningFailed(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);

        let bytes = signature.to_bytes();
        let mut r = [0u8; HASH_SIZE];
        let mut s = [0u8; HASH_SIZE];
        r.copy_from_slice(&bytes[..HASH_SIZE]);
        s.copy_from_slice(&bytes[HASH_SIZE..]);

        for v in 0..2u8 {
            if let Ok(candidate) = Self::recover_from_prehash(&digest, &r, &s, v) {
                if candidate == public_key {
                    trace!(recovery_id = v, "signed message");
                    return Ok(Signature { r, s, v });
                }
            }
        }
        Err(Error::SigningFailed("could not determine recovery id".to_string()))
    }

    /// Verifies `signature` over `message` (hashed with SHA-256).
    pub fn verify(message: &[u8], signature: &Signature, public_key: &ECPoint) -> bool {
        let digest = sha256(message);
        Self::verify_prehash(&digest, signature, public_key)
    }

    fn verify_prehash(digest: &[u8; HASH_SIZE], signature: &Signature, public_key: &ECPoint) -> bool {
        let Ok(sig) = signature.to_p256() else {
            return false;
        };
        let Ok(key) = public_key.to_public_key() else {
            return false;
        };
        VerifyingKey::from(&key).verify_prehash(digest, &sig).is_ok()
    }

    /// Recovers the signer's public key from `message` and `signature`.
    ///
    /// The signature's own recovery id is tried first, then the opposite
    /// parity. The first candidate that verifies the signature is returned.
    pub fn recover_public_key(message: &[u8], signature: &Signature) -> Result<ECPoint> {
        let digest = sha256(message);
        let preferred = signature.v & 0b01;
        for parity in [preferred, preferred ^ 0b01] {
            let v = (signature.v & 0b10) | parity;
            if let Ok(candidate) = Self::recover_from_prehash(&digest, &signature.r, &signature.s, v) {
                if Self::verify_prehash(&digest, signature, &candidate) {
                    return Ok(candidate);
                }
            }
        }
        Err(Error::RecoveryFailed(
            "no candidate key verifies the signature".to_string(),
        ))
    }

    /// Computes `Q = r⁻¹(sR − zG)` for the nonce point `R` selected by
    /// `recovery_id` (bit 0 is the y-parity, bit 1 adds the curve order to x).
    fn recover_from_prehash(
        digest: &[u8; HASH_SIZE],
        r_bytes: &[u8; HASH_SIZE],
        s_bytes: &[u8; HASH_SIZE],
        recovery_id: u8,
    ) -> Result<ECPoint> {
        use p256::elliptic_curve::{
            bigint::{Encoding, U256},
            group::Group,
            ops::Reduce,
            sec1::FromEncodedPoint,
            Curve, Field, PrimeField,
        };

        let r_scalar =
            Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(r_bytes)))
                .ok_or_else(|| Error::InvalidSignature("r not canonical".to_string()))?;
        let s_scalar =
            Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(s_bytes)))
                .ok_or_else(|| Error::InvalidSignature("s not canonical".to_string()))?;

        if bool::from(r_scalar.is_zero()) || bool::from(s_scalar.is_zero()) {
            return Err(Error::InvalidSignature("r or s is zero".to_string()));
        }

        let z_scalar = <Scalar as Reduce<U256>>::reduce(U256::from_be_bytes(*digest));

        let mut x_candidate = U256::from_be_bytes(*r_bytes);
        if (recovery_id & 0b10) != 0 {
            let candidate = x_candidate.wrapping_add(&NistP256::ORDER);
            if candidate < x_candidate {
                return Err(Error::RecoveryFailed("x coordinate overflow".to_string()));
            }
            x_candidate = candidate;
        }

        let mut encoded = [0u8; 33];
        encoded[0] = if (recovery_id & 0b01) != 0 { 0x03 } else { 0x02 };
        encoded[1..].copy_from_slice(&x_candidate.to_be_bytes());

        let encoded_point = EncodedPoint::from_bytes(encoded)
            .map_err(|_| Error::RecoveryFailed("failed to decode candidate point".to_string()))?;
        let r_affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded_point))
            .ok_or_else(|| Error::RecoveryFailed("candidate point is not on the curve".to_string()))?;
        let r_projective = ProjectivePoint::from(r_affine);

        let r_inv = Option::<Scalar>::from(r_scalar.invert())
            .ok_or_else(|| Error::RecoveryFailed("r has no inverse".to_string()))?;

        let u1 = -(z_scalar * r_inv);
        let u2 = s_scalar * r_inv;
        let recovered = ProjectivePoint::generator() * u1 + r_projective * u2;

        if bool::from(recovered.is_identity()) {
            return Err(Error::RecoveryFailed("recovered the point at infinity".to_string()));
        }

        let encoded = recovered.to_affine().to_encoded_point(true);
        ECPoint::from_bytes(encoded.as_bytes())
    }

    fn secret_key(private_key: &[u8]) -> Result<SecretKey> {
        if private_key.len() != HASH_SIZE {
            return Err(Error::InvalidKey(format!(
                "private key must be {} bytes, got {}",
                HASH_SIZE,
                private_key.len()
            )));
        }
        SecretKey::from_slice(private_key)
            .map_err(|_| Error::InvalidKey("scalar is zero or not below the curve order".to_string()))
    }
}
