//! Transaction construction, hashing and wire validation.

use hex_literal::hex;
use neo_core::{
    CoreError, Signer, SignerBuilder, Transaction, TransactionAttribute, TransactionBuilder,
    UInt160, UInt256, Witness, WitnessCondition, WitnessRule, WitnessRuleAction, WitnessScope,
};

const ACCOUNT: [u8; 20] = hex!("6380ce3d7de7855bc5c1076d3b515eda380d2e90");

fn unsigned() -> Transaction {
    TransactionBuilder::new()
        .nonce(1)
        .valid_until_block(100)
        .script(vec![0x11, 0x40])
        .signer(Signer::called_by_entry(UInt160::new(ACCOUNT)))
        .build()
        .unwrap()
}

#[test]
fn test_hash_data_layout() {
    let tx = unsigned();
    assert_eq!(
        tx.get_hash_data().unwrap(),
        hex!(
            "00010000000000000000000000000000000000000064000000"
            "016380ce3d7de7855bc5c1076d3b515eda380d2e9001"
            "00021140"
        )
        .to_vec()
    );
}

#[test]
fn test_hash_is_single_sha256() {
    let tx = unsigned();
    assert_eq!(
        tx.hash().unwrap().to_string(),
        "0x976d7510b8f9d5f3d7e8958dbd9a9507bf0a8b3bc8507181b5e77941ca897586"
    );
    assert_eq!(
        tx.get_sign_data(860833102).unwrap(),
        hex!("4e454f33867589ca4179e7b5817150c83b8b0abf07959abd8d95e8d7f3d5f9b810756d97").to_vec()
    );
}

#[test]
fn test_mutation_invalidates_hash() {
    let mut tx = unsigned();
    let before = tx.hash().unwrap();
    tx.set_nonce(2);
    let after = tx.hash().unwrap();
    assert_ne!(before, after);
    tx.set_nonce(1);
    assert_eq!(tx.hash().unwrap(), before);
}

#[test]
fn test_witnesses_do_not_change_hash() {
    let mut tx = unsigned();
    let before = tx.hash().unwrap();
    tx.add_witness(Witness::new(vec![0x0c, 0x40], vec![0x41]).unwrap());
    assert_eq!(tx.hash().unwrap(), before);
}

#[test]
fn test_serialize_requires_matching_witnesses() {
    let tx = unsigned();
    assert!(matches!(tx.to_bytes(), Err(CoreError::State { .. })));

    let empty = Transaction::new();
    assert!(matches!(empty.hash(), Err(CoreError::State { .. })));
}

#[test]
fn test_signed_round_trip_with_rules() {
    let signer = SignerBuilder::create_empty()
        .account(UInt160::new(ACCOUNT))
        .add_witness_scope(WitnessScope::CALLED_BY_ENTRY)
        .add_witness_rule(WitnessRule::new(
            WitnessRuleAction::Deny,
            WitnessCondition::Not {
                expression: Box::new(WitnessCondition::ScriptHash {
                    hash: UInt160::new([7; 20]),
                }),
            },
        ))
        .build()
        .unwrap();

    let mut tx = TransactionBuilder::new()
        .nonce(99)
        .system_fee(1_0000_0000)
        .network_fee(123_456)
        .valid_until_block(5760)
        .script(vec![0x11, 0x40])
        .signer(signer)
        .attribute(TransactionAttribute::Conflicts {
            hash: UInt256::new([1; 32]),
        })
        .attribute(TransactionAttribute::Conflicts {
            hash: UInt256::new([2; 32]),
        })
        .build()
        .unwrap();
    tx.add_witness(Witness::new(vec![0x0c, 0x01, 0xff], vec![0x40]).unwrap());

    let bytes = tx.to_bytes().unwrap();
    let parsed = Transaction::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, tx);
    assert_eq!(parsed.hash().unwrap(), tx.hash().unwrap());
    assert_eq!(
        parsed.signers()[0].scopes(),
        WitnessScope::CALLED_BY_ENTRY | WitnessScope::WITNESS_RULES
    );
}

#[test]
fn test_signer_and_attribute_budget() {
    let mut tx = unsigned();
    for i in 1..16u8 {
        tx.add_signer(Signer::none(UInt160::new([i; 20]))).unwrap();
    }
    let err = tx
        .add_attribute(TransactionAttribute::HighPriority)
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidSize { .. }));
}

#[test]
fn test_single_instance_attributes() {
    let mut tx = unsigned();
    tx.add_attribute(TransactionAttribute::NotValidBefore { height: 1 })
        .unwrap();
    assert!(tx
        .add_attribute(TransactionAttribute::NotValidBefore { height: 2 })
        .is_err());
}

#[test]
fn test_oversized_payload_rejected() {
    let data = vec![0u8; neo_core::transaction::MAX_TRANSACTION_SIZE + 1];
    assert!(matches!(
        Transaction::from_bytes(&data),
        Err(CoreError::InvalidSize { .. })
    ));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn scope_strategy() -> impl Strategy<Value = WitnessScope> {
        prop_oneof![
            Just(WitnessScope::NONE),
            Just(WitnessScope::CALLED_BY_ENTRY),
            Just(WitnessScope::GLOBAL),
        ]
    }

    proptest! {
        #[test]
        fn hash_ignores_witnesses(
            nonce in any::<u32>(),
            valid_until_block in any::<u32>(),
            scope in scope_strategy(),
            invocation in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let mut tx = TransactionBuilder::new()
                .nonce(nonce)
                .valid_until_block(valid_until_block)
                .script(vec![0x11, 0x40])
                .signer(Signer::new(UInt160::new(ACCOUNT), scope).unwrap())
                .build()
                .unwrap();
            let before = tx.hash().unwrap();
            tx.set_witnesses(vec![Witness::new(invocation, vec![]).unwrap()]);
            prop_assert_eq!(tx.hash().unwrap(), before);

            let parsed = Transaction::from_bytes(&tx.to_bytes().unwrap()).unwrap();
            prop_assert_eq!(parsed.hash().unwrap(), before);
            prop_assert_eq!(parsed.signers()[0].scopes(), scope);
        }
    }
}
