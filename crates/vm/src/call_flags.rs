//! Call flags passed to `System.Contract.Call`.
//!
//! They restrict what the called contract may do.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Flags that control what operations a called contract can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CallFlags(u8);

impl CallFlags {
    pub const NONE: Self = Self(0);

    /// Allow reading states.
    pub const READ_STATES: Self = Self(0x01);

    /// Allow writing states.
    pub const WRITE_STATES: Self = Self(0x02);

    /// Allow calling other contracts.
    pub const ALLOW_CALL: Self = Self(0x04);

    /// Allow sending notifications.
    pub const ALLOW_NOTIFY: Self = Self(0x08);

    pub const STATES: Self = Self(Self::READ_STATES.0 | Self::WRITE_STATES.0);

    pub const READ_ONLY: Self = Self(Self::READ_STATES.0 | Self::ALLOW_CALL.0);

    /// Allow all operations.
    pub const ALL: Self = Self(
        Self::READ_STATES.0 | Self::WRITE_STATES.0 | Self::ALLOW_CALL.0 | Self::ALLOW_NOTIFY.0,
    );

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has_flag(self, flag: Self) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Returns `None` if bits outside [`CallFlags::ALL`] are set.
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }
}

impl BitOr for CallFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl TryFrom<u8> for CallFlags {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_bits(value).ok_or_else(|| format!("invalid call flags 0x{:02x}", value))
    }
}

impl From<CallFlags> for u8 {
    fn from(flags: CallFlags) -> Self {
        flags.0
    }
}

impl fmt::Display for CallFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.write_str("None"),
            Self::ALL => f.write_str("All"),
            Self::STATES => f.write_str("States"),
            Self::READ_ONLY => f.write_str("ReadOnly"),
            other => write!(f, "0x{:02x}", other.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(CallFlags::ALL.bits(), 0x0F);
        assert_eq!(CallFlags::READ_ONLY.bits(), 0x05);
        assert!(CallFlags::ALL.has_flag(CallFlags::ALLOW_NOTIFY));
        assert!(!CallFlags::READ_ONLY.has_flag(CallFlags::WRITE_STATES));
    }

    #[test]
    fn test_from_bits() {
        assert_eq!(CallFlags::from_bits(0x03), Some(CallFlags::STATES));
        assert_eq!(CallFlags::from_bits(0x10), None);
        assert_eq!(
            CallFlags::READ_STATES | CallFlags::ALLOW_CALL,
            CallFlags::READ_ONLY
        );
    }
}
