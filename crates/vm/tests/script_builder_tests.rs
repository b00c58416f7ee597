//! Script assembly properties checked against the script readers.

use neo_cryptography::ECDsa;
use neo_io::MemoryReader;
use neo_vm::{parse_multisig_contract, ScriptBuilder};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pushed_integers_read_back(value in any::<i64>()) {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_integer(value);
        let script = builder.to_array();
        let mut reader = MemoryReader::new(&script);
        prop_assert_eq!(reader.read_push_integer().unwrap(), value);
        prop_assert!(reader.is_empty());
    }

    #[test]
    fn pushed_bytes_read_back(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        let mut builder = ScriptBuilder::new();
        builder.emit_push(&data);
        let script = builder.to_array();
        let mut reader = MemoryReader::new(&script);
        prop_assert_eq!(reader.read_push_data().unwrap(), data);
    }

    #[test]
    fn pushed_bools_read_back(value in any::<bool>()) {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_bool(value);
        let script = builder.to_array();
        prop_assert_eq!(MemoryReader::new(&script).read_push_bool().unwrap(), value);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn multisig_script_ignores_key_order(count in 1usize..8, seed in any::<u64>()) {
        let keys: Vec<_> = (0..count)
            .map(|_| ECDsa::derive_public_key(&ECDsa::generate_private_key()).unwrap())
            .collect();
        let threshold = 1 + (seed as usize % count);

        let mut shuffled = keys.clone();
        shuffled.rotate_left(seed as usize % count);
        shuffled.reverse();

        let script = ScriptBuilder::build_verification_script_multisig(threshold, &keys).unwrap();
        let other = ScriptBuilder::build_verification_script_multisig(threshold, &shuffled).unwrap();
        prop_assert_eq!(&script, &other);

        let (parsed_threshold, parsed_keys) = parse_multisig_contract(&script).unwrap();
        prop_assert_eq!(parsed_threshold, threshold);
        let mut sorted = keys;
        sorted.sort();
        prop_assert_eq!(parsed_keys, sorted);
    }
}

#[test]
fn large_multisig_counts_use_pushdata() {
    let keys: Vec<_> = (0..20)
        .map(|_| ECDsa::derive_public_key(&ECDsa::generate_private_key()).unwrap())
        .collect();
    let script = ScriptBuilder::build_verification_script_multisig(17, &keys).unwrap();
    assert_eq!(&script[..3], &[0x0C, 0x01, 17]);
    let (threshold, parsed) = parse_multisig_contract(&script).unwrap();
    assert_eq!(threshold, 17);
    assert_eq!(parsed.len(), 20);
}
