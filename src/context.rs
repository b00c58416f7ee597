//! One-time SDK initialization.
//!
//! [`SdkContext::initialize`] runs a short known-answer self-test of the
//! hash functions and the signature engine. The outcome is computed once per
//! process; a failure is cached and returned on every later call.

use crate::{SdkError, SdkResult};
use neo_cryptography::{hash, ECDsa};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

static CONTEXT: OnceCell<Result<SdkContext, String>> = OnceCell::new();
static TORN_DOWN: AtomicBool = AtomicBool::new(false);

// SHA-256("abc")
const SHA256_ABC: [u8; 32] = [
    0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22, 0x23,
    0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00, 0x15, 0xad,
];

const SELF_TEST_KEY: [u8; 32] = [0x01; 32];

// Compressed public key of SELF_TEST_KEY
const SELF_TEST_PUBLIC_KEY: [u8; 33] = [
    0x02, 0x6f, 0xf0, 0x3b, 0x94, 0x92, 0x41, 0xce, 0x1d, 0xad, 0xd4, 0x35, 0x19, 0xe6, 0x96, 0x0e,
    0x0a, 0x85, 0xb4, 0x1a, 0x69, 0xa0, 0x5c, 0x32, 0x81, 0x03, 0xaa, 0x2b, 0xce, 0x15, 0x94, 0xca,
    0x16,
];

/// Proof that the process passed the SDK self-test.
#[derive(Debug)]
pub struct SdkContext {
    version: &'static str,
}

impl SdkContext {
    /// Runs the self-test on first use and returns the shared context.
    pub fn initialize() -> SdkResult<&'static SdkContext> {
        let outcome = CONTEXT.get_or_init(|| {
            let result = Self::self_test().map(|_| SdkContext {
                version: crate::VERSION,
            });
            match &result {
                Ok(_) => info!(version = crate::VERSION, "neo-sdk initialized"),
                Err(reason) => error!(%reason, "neo-sdk self-test failed"),
            }
            result
        });
        TORN_DOWN.store(false, Ordering::SeqCst);
        outcome
            .as_ref()
            .map_err(|reason| SdkError::Initialization(reason.clone()))
    }

    /// Whether [`SdkContext::initialize`] has completed successfully.
    pub fn is_initialized() -> bool {
        matches!(CONTEXT.get(), Some(Ok(_))) && !TORN_DOWN.load(Ordering::SeqCst)
    }

    /// Marks the SDK as shut down. Safe to call any number of times; owned
    /// resources are already released by their destructors.
    pub fn teardown() {
        if !TORN_DOWN.swap(true, Ordering::SeqCst) {
            debug!("neo-sdk torn down");
        }
    }

    /// Crate version the self-test ran under.
    pub fn version(&self) -> &'static str {
        self.version
    }

    fn self_test() -> Result<(), String> {
        if hash::sha256(b"abc") != SHA256_ABC {
            return Err("SHA-256 known-answer test failed".to_string());
        }

        let public_key = ECDsa::derive_public_key(&SELF_TEST_KEY).map_err(|e| e.to_string())?;
        if public_key.encode_point() != SELF_TEST_PUBLIC_KEY {
            return Err("public key derivation known-answer test failed".to_string());
        }

        let message = b"neo-sdk self-test";
        let signature = ECDsa::sign(message, &SELF_TEST_KEY).map_err(|e| e.to_string())?;
        if !signature.is_low_s() || !ECDsa::verify(message, &signature, &public_key) {
            return Err("signature round trip failed".to_string());
        }
        let recovered =
            ECDsa::recover_public_key(message, &signature).map_err(|e| e.to_string())?;
        if recovered != public_key {
            return Err("public key recovery failed".to_string());
        }
        Ok(())
    }
}
