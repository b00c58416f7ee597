//! Cryptographic primitives for the Neo N3 SDK.
//!
//! Provides the hash functions used for identifiers and addresses, Base58 and
//! Base58Check encoding, the secp256r1 public key type [`ECPoint`] and
//! recoverable ECDSA signatures.

pub mod base58;
pub mod ecc;
pub mod ecdsa;
mod error;
pub mod hash;

pub use base58::{FromBase58Check, ToBase58Check};
pub use ecc::ECPoint;
pub use ecdsa::{ECDsa, Signature};
pub use error::{Error, Result};
