//! Recognizes the standard verification scripts.

use crate::interop_service::InteropService;
use crate::op_code::OpCode;
use neo_config::MAX_MULTISIG_KEYS;
use neo_cryptography::ecc::COMPRESSED_SIZE;
use neo_cryptography::ECPoint;
use neo_io::MemoryReader;

const SIGNATURE_CONTRACT_SIZE: usize = 2 + COMPRESSED_SIZE + 5;

/// Whether `script` is `PUSHDATA1 <33-byte key> SYSCALL System.Crypto.CheckSig`.
pub fn is_signature_contract(script: &[u8]) -> bool {
    script.len() == SIGNATURE_CONTRACT_SIZE
        && script[0] == OpCode::PUSHDATA1 as u8
        && script[1] as usize == COMPRESSED_SIZE
        && script[35] == OpCode::SYSCALL as u8
        && script[36..] == InteropService::CryptoCheckSig.hash_bytes()
}

/// The public key of a single-signature verification script.
pub fn parse_signature_contract(script: &[u8]) -> Option<ECPoint> {
    if !is_signature_contract(script) {
        return None;
    }
    ECPoint::from_bytes(&script[2..2 + COMPRESSED_SIZE]).ok()
}

pub fn is_multisig_contract(script: &[u8]) -> bool {
    parse_multisig_contract(script).is_some()
}

/// Splits a multi-signature verification script into its threshold and
/// public keys, in script order.
///
/// Returns `None` unless the script is exactly
/// `PUSH m, PUSHDATA1 key × n, PUSH n, SYSCALL System.Crypto.CheckMultisig`
/// with `1 <= m <= n <= 1024`.
pub fn parse_multisig_contract(script: &[u8]) -> Option<(usize, Vec<ECPoint>)> {
    let mut reader = MemoryReader::new(script);
    let threshold = reader.read_push_integer().ok()?;

    let mut keys = Vec::new();
    // A key is PUSHDATA1 with a 33-byte payload; a count above 16 is a
    // shorter PUSHDATA1 and ends the key list.
    while reader.peek().ok()? == OpCode::PUSHDATA1 as u8
        && script.get(reader.position() + 1) == Some(&(COMPRESSED_SIZE as u8))
    {
        let data = reader.read_push_data().ok()?;
        keys.push(ECPoint::from_bytes(&data).ok()?);
    }

    let count = reader.read_push_integer().ok()?;
    if count < 1 || count as usize != keys.len() || keys.len() > MAX_MULTISIG_KEYS {
        return None;
    }
    if threshold < 1 || threshold > count {
        return None;
    }
    if reader.read_u8().ok()? != OpCode::SYSCALL as u8 {
        return None;
    }
    if reader.read_bytes(4).ok()? != InteropService::CryptoCheckMultisig.hash_bytes() {
        return None;
    }
    if !reader.is_empty() {
        return None;
    }
    Some((threshold as usize, keys))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptBuilder;

    fn keys() -> Vec<ECPoint> {
        [
            "026ff03b949241ce1dadd43519e6960e0a85b41a69a05c328103aa2bce1594ca16",
            "035a928f201639204e06b4368b1a93365462a8ebbff0b8818151b74faab3a2b61a",
            "02550f471003f3df97c3df506ac797f6721fb1a1fb7b8f6f83d224498a65c88e24",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect()
    }

    #[test]
    fn test_signature_contract() {
        let key = keys()[1];
        let script = ScriptBuilder::build_verification_script(&key);
        assert!(is_signature_contract(&script));
        assert_eq!(parse_signature_contract(&script), Some(key));
        assert!(!is_multisig_contract(&script));

        let mut broken = script.clone();
        broken[39] ^= 1;
        assert!(!is_signature_contract(&broken));
    }

    #[test]
    fn test_multisig_contract() {
        let script = ScriptBuilder::build_verification_script_multisig(2, &keys()).unwrap();
        let (threshold, parsed) = parse_multisig_contract(&script).unwrap();
        assert_eq!(threshold, 2);
        let mut sorted = keys();
        sorted.sort();
        assert_eq!(parsed, sorted);
        assert!(!is_signature_contract(&script));
    }

    #[test]
    fn test_multisig_rejects_trailing_bytes_and_bad_counts() {
        let mut script = ScriptBuilder::build_verification_script_multisig(2, &keys()).unwrap();
        script.push(0x40);
        assert!(parse_multisig_contract(&script).is_none());

        let mut wrong_count =
            ScriptBuilder::build_verification_script_multisig(2, &keys()).unwrap();
        let count_index = wrong_count.len() - 6;
        wrong_count[count_index] = OpCode::PUSH2 as u8;
        assert!(parse_multisig_contract(&wrong_count).is_none());
    }

    #[test]
    fn test_multisig_accepts_pushint_threshold() {
        let key_list = keys();
        let mut script = vec![OpCode::PUSHINT8 as u8, 0x01];
        for key in &key_list[..2] {
            script.push(OpCode::PUSHDATA1 as u8);
            script.push(33);
            script.extend_from_slice(key.as_bytes());
        }
        script.push(OpCode::PUSH2 as u8);
        script.push(OpCode::SYSCALL as u8);
        script.extend_from_slice(&InteropService::CryptoCheckMultisig.hash_bytes());
        let (threshold, parsed) = parse_multisig_contract(&script).unwrap();
        assert_eq!(threshold, 1);
        assert_eq!(parsed.len(), 2);
    }
}
