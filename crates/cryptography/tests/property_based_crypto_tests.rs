//! Property-based tests for signing, recovery and Base58.

use neo_cryptography::{
    base58,
    ecdsa::{ECDsa, Signature},
    FromBase58Check, ToBase58Check,
};
use proptest::prelude::*;

/// Private keys that are valid scalars (first byte kept below 0xff so the
/// value never reaches the curve order).
fn private_key() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
        .prop_map(|mut key| {
            key[0] &= 0x7f;
            key[31] |= 0x01;
            key
        })
}

mod ecdsa_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// A signature verifies under the signer's key and recovers it.
        #[test]
        fn prop_sign_verify_recover(
            key in private_key(),
            message in prop::collection::vec(any::<u8>(), 0..128)
        ) {
            let public_key = ECDsa::derive_public_key(&key).unwrap();
            let signature = ECDsa::sign(&message, &key).unwrap();

            prop_assert!(signature.is_low_s());
            prop_assert!(signature.v() <= 1);
            prop_assert!(ECDsa::verify(&message, &signature, &public_key));
            prop_assert_eq!(ECDsa::recover_public_key(&message, &signature).unwrap(), public_key);
        }

        /// The compressed prefix encodes the parity of y.
        #[test]
        fn prop_public_key_is_compressed(key in private_key()) {
            let public_key = ECDsa::derive_public_key(&key).unwrap();
            let encoded = public_key.encode_point();
            prop_assert!(encoded[0] == 0x02 || encoded[0] == 0x03);
            let uncompressed = public_key.encode_uncompressed().unwrap();
            prop_assert_eq!(encoded[0] & 0x01, uncompressed[64] & 0x01);
            prop_assert_eq!(&encoded[1..], &uncompressed[1..33]);
        }

        /// A flipped bit in the message breaks verification.
        #[test]
        fn prop_tampered_message_fails(
            key in private_key(),
            message in prop::collection::vec(any::<u8>(), 1..64),
            index in any::<prop::sample::Index>()
        ) {
            let public_key = ECDsa::derive_public_key(&key).unwrap();
            let signature = ECDsa::sign(&message, &key).unwrap();
            let mut tampered = message.clone();
            let i = index.index(tampered.len());
            tampered[i] ^= 0x01;
            prop_assert!(!ECDsa::verify(&tampered, &signature, &public_key));
        }

        /// All-zero signatures never verify.
        #[test]
        fn prop_zero_signature_fails(
            key in private_key(),
            message in prop::collection::vec(any::<u8>(), 0..64)
        ) {
            let public_key = ECDsa::derive_public_key(&key).unwrap();
            let zero = Signature::from_bytes(&[0u8; 64]).unwrap();
            prop_assert!(!ECDsa::verify(&message, &zero, &public_key));
        }
    }
}

mod base58_properties {
    use super::*;

    proptest! {
        #[test]
        fn prop_base58_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let encoded = base58::encode(&data);
            prop_assert_eq!(base58::decode(&encoded).unwrap(), data);
        }

        #[test]
        fn prop_base58_check_roundtrip(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let encoded = data.to_base58_check();
            prop_assert_eq!(Vec::<u8>::from_base58_check(&encoded).unwrap(), data);
        }

        /// Altering a checksum byte makes decoding fail.
        #[test]
        fn prop_base58_check_detects_corruption(
            data in prop::collection::vec(any::<u8>(), 1..64),
            flip in 1u8..=255
        ) {
            let mut raw = base58::decode(&data.to_base58_check()).unwrap();
            let last = raw.len() - 1;
            raw[last] ^= flip;
            prop_assert!(Vec::<u8>::from_base58_check(base58::encode(&raw)).is_err());
        }
    }
}
