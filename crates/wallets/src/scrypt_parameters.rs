//! Scrypt parameters for NEP-2 key encryption.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the key scrypt derives for NEP-2.
pub const DERIVED_KEY_LENGTH: usize = 64;

/// Scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptParameters {
    /// CPU/memory cost parameter (N), a power of two.
    pub n: u32,
    /// Block size parameter (r).
    pub r: u32,
    /// Parallelization parameter (p).
    pub p: u32,
}

impl ScryptParameters {
    pub fn new(n: u32, r: u32, p: u32) -> Result<Self> {
        let params = Self { n, r, p };
        params.validate()?;
        Ok(params)
    }

    /// The NEP-2 defaults: N=16384, r=8, p=8.
    pub fn default_nep2() -> Self {
        Self {
            n: 16384,
            r: 8,
            p: 8,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.n <= 1 || !self.n.is_power_of_two() {
            return Err(Error::InvalidArgument(
                "N must be a power of 2 greater than 1".to_string(),
            ));
        }
        if self.r == 0 {
            return Err(Error::InvalidArgument("R must be greater than 0".to_string()));
        }
        if self.p == 0 {
            return Err(Error::InvalidArgument("P must be greater than 0".to_string()));
        }
        if self.r > u32::MAX / 128 || self.n > u32::MAX / (128 * self.r) {
            return Err(Error::InvalidArgument("N or R parameter is too large".to_string()));
        }
        Ok(())
    }

    /// log2(N).
    pub fn log_n(&self) -> u8 {
        self.n.trailing_zeros() as u8
    }

    /// Approximate memory scrypt needs, in bytes.
    pub fn memory_usage(&self) -> u64 {
        128 * self.r as u64 * self.n as u64
    }

    pub(crate) fn to_scrypt_params(self) -> Result<scrypt::Params> {
        self.validate()?;
        scrypt::Params::new(self.log_n(), self.r, self.p, DERIVED_KEY_LENGTH)
            .map_err(|e| Error::Scrypt(e.to_string()))
    }
}

impl Default for ScryptParameters {
    fn default() -> Self {
        Self::default_nep2()
    }
}

impl fmt::Display for ScryptParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScryptParameters(N={}, r={}, p={})", self.n, self.r, self.p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrypt_parameters_validation() {
        assert!(ScryptParameters::new(16384, 8, 8).is_ok());
        assert!(ScryptParameters::new(1, 8, 8).is_err());
        assert!(ScryptParameters::new(16383, 8, 8).is_err());
        assert!(ScryptParameters::new(16384, 0, 8).is_err());
        assert!(ScryptParameters::new(16384, 8, 0).is_err());
    }

    #[test]
    fn test_defaults() {
        let params = ScryptParameters::default();
        assert_eq!(params, ScryptParameters::new(16384, 8, 8).unwrap());
        assert_eq!(params.log_n(), 14);
        assert_eq!(params.memory_usage(), 128 * 8 * 16384);
        assert!(params.to_scrypt_params().is_ok());
    }

    #[test]
    fn test_serialization() {
        let params = ScryptParameters::default_nep2();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"n":16384,"r":8,"p":8}"#);
        let deserialized: ScryptParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, deserialized);
    }
}
