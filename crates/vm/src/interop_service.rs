//! Interop services reachable through `SYSCALL`.
//!
//! A syscall operand is the first four bytes of SHA-256 over the service
//! name, read as a little-endian `u32`.

use neo_cryptography::hash::sha256;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

macro_rules! interop_services {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// The system interop services a client script may call.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum InteropService {
            $($variant,)*
        }

        impl InteropService {
            /// Every known service.
            pub const ALL: &'static [InteropService] = &[$(InteropService::$variant,)*];

            /// The dotted service name, e.g. `System.Crypto.CheckSig`.
            pub fn name(self) -> &'static str {
                match self {
                    $(InteropService::$variant => $name,)*
                }
            }
        }
    };
}

interop_services! {
    ContractCall => "System.Contract.Call",
    ContractCallNative => "System.Contract.CallNative",
    ContractGetCallFlags => "System.Contract.GetCallFlags",
    ContractCreateStandardAccount => "System.Contract.CreateStandardAccount",
    ContractCreateMultisigAccount => "System.Contract.CreateMultisigAccount",
    CryptoCheckSig => "System.Crypto.CheckSig",
    CryptoCheckMultisig => "System.Crypto.CheckMultisig",
    IteratorNext => "System.Iterator.Next",
    IteratorValue => "System.Iterator.Value",
    RuntimePlatform => "System.Runtime.Platform",
    RuntimeGetNetwork => "System.Runtime.GetNetwork",
    RuntimeGetTrigger => "System.Runtime.GetTrigger",
    RuntimeGetTime => "System.Runtime.GetTime",
    RuntimeGetScriptContainer => "System.Runtime.GetScriptContainer",
    RuntimeGetExecutingScriptHash => "System.Runtime.GetExecutingScriptHash",
    RuntimeGetCallingScriptHash => "System.Runtime.GetCallingScriptHash",
    RuntimeGetEntryScriptHash => "System.Runtime.GetEntryScriptHash",
    RuntimeCheckWitness => "System.Runtime.CheckWitness",
    RuntimeGetInvocationCounter => "System.Runtime.GetInvocationCounter",
    RuntimeLog => "System.Runtime.Log",
    RuntimeNotify => "System.Runtime.Notify",
    RuntimeGasLeft => "System.Runtime.GasLeft",
    RuntimeBurnGas => "System.Runtime.BurnGas",
    StorageGetContext => "System.Storage.GetContext",
    StorageGetReadOnlyContext => "System.Storage.GetReadOnlyContext",
    StorageGet => "System.Storage.Get",
    StorageFind => "System.Storage.Find",
    StoragePut => "System.Storage.Put",
    StorageDelete => "System.Storage.Delete",
}

static BY_HASH: Lazy<HashMap<u32, InteropService>> = Lazy::new(|| {
    InteropService::ALL
        .iter()
        .map(|service| (service.hash(), *service))
        .collect()
});

impl InteropService {
    /// The 4-byte syscall operand in script order.
    pub fn hash_bytes(self) -> [u8; 4] {
        interop_hash_bytes(self.name())
    }

    /// The syscall id as a `u32`.
    pub fn hash(self) -> u32 {
        u32::from_le_bytes(self.hash_bytes())
    }

    /// Looks up a service by its syscall id.
    pub fn from_hash(hash: u32) -> Option<Self> {
        BY_HASH.get(&hash).copied()
    }
}

impl fmt::Display for InteropService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The syscall operand for an arbitrary service name.
pub fn interop_hash_bytes(name: &str) -> [u8; 4] {
    let digest = sha256(name.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert_eq!(InteropService::CryptoCheckSig.hash_bytes(), [0x56, 0xe7, 0xb3, 0x27]);
        assert_eq!(
            InteropService::CryptoCheckMultisig.hash_bytes(),
            [0x9e, 0xd0, 0xdc, 0x3a]
        );
        assert_eq!(InteropService::ContractCall.hash_bytes(), [0x62, 0x7d, 0x5b, 0x52]);
        assert_eq!(InteropService::RuntimeCheckWitness.hash(), 0x8cec27f8);
    }

    #[test]
    fn test_lookup_by_hash() {
        for service in InteropService::ALL {
            assert_eq!(InteropService::from_hash(service.hash()), Some(*service));
        }
        assert_eq!(InteropService::from_hash(0), None);
    }
}
