//! secp256r1 public keys.

use crate::hash;
use crate::{Error, Result};
use neo_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Length of a compressed SEC1 point.
pub const COMPRESSED_SIZE: usize = 33;
/// Length of an uncompressed SEC1 point.
pub const UNCOMPRESSED_SIZE: usize = 65;

/// A point on secp256r1, kept in compressed SEC1 form.
///
/// Points order by X coordinate, then Y. This is the order keys take inside
/// multi-signature verification scripts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ECPoint {
    encoded: [u8; COMPRESSED_SIZE],
}

impl ECPoint {
    /// Parses a compressed (33 byte) or uncompressed (65 byte) encoding.
    /// The point must lie on the curve and must not be the identity.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match data.len() {
            COMPRESSED_SIZE if data[0] == 0x02 || data[0] == 0x03 => {}
            UNCOMPRESSED_SIZE if data[0] == 0x04 => {}
            len => {
                return Err(Error::InvalidPoint(format!(
                    "unsupported encoding of {} bytes with prefix 0x{:02x}",
                    len,
                    data.first().copied().unwrap_or_default()
                )))
            }
        }
        let public_key = PublicKey::from_sec1_bytes(data)
            .map_err(|_| Error::InvalidPoint("point is not on secp256r1".to_string()))?;
        Ok(Self::from_public_key(&public_key))
    }

    pub(crate) fn from_public_key(public_key: &PublicKey) -> Self {
        let point = public_key.to_encoded_point(true);
        let mut encoded = [0u8; COMPRESSED_SIZE];
        encoded.copy_from_slice(point.as_bytes());
        Self { encoded }
    }

    pub(crate) fn to_public_key(&self) -> Result<PublicKey> {
        PublicKey::from_sec1_bytes(&self.encoded)
            .map_err(|_| Error::InvalidPoint("point is not on secp256r1".to_string()))
    }

    /// The 33-byte compressed encoding.
    pub fn encode_point(&self) -> [u8; COMPRESSED_SIZE] {
        self.encoded
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// The 65-byte uncompressed encoding.
    pub fn encode_uncompressed(&self) -> Result<Vec<u8>> {
        Ok(self.to_public_key()?.to_encoded_point(false).as_bytes().to_vec())
    }

    /// Hash160 of the compressed encoding.
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(&self.encoded)
    }

    /// Big-endian X coordinate.
    pub fn x(&self) -> &[u8] {
        &self.encoded[1..]
    }

    fn y(&self) -> Option<[u8; 32]> {
        let public_key = self.to_public_key().ok()?;
        let point = public_key.to_encoded_point(false);
        let mut y = [0u8; 32];
        y.copy_from_slice(point.y()?);
        Some(y)
    }
}

impl Ord for ECPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.x().cmp(other.x()) {
            // same X with a different prefix means Y and -Y
            Ordering::Equal if self.encoded[0] != other.encoded[0] => self.y().cmp(&other.y()),
            ordering => ordering,
        }
    }
}

impl PartialOrd for ECPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ECPoint({})", hex::encode(self.encoded))
    }
}

impl fmt::Display for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.encoded))
    }
}

impl FromStr for ECPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidPoint(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl TryFrom<&[u8]> for ECPoint {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::from_bytes(value)
    }
}

impl Serializable for ECPoint {
    fn size(&self) -> usize {
        COMPRESSED_SIZE
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.encoded)
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let bytes = reader.read_memory(COMPRESSED_SIZE)?;
        ECPoint::from_bytes(bytes).map_err(|e| IoError::invalid_data(e.to_string()))
    }
}

impl Serialize for ECPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ECPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATOR_COMPRESSED: &str =
        "036b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296";
    const GENERATOR_UNCOMPRESSED: &str = "046b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c2964fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5";

    #[test]
    fn test_uncompressed_input_is_compressed() {
        let compressed: ECPoint = GENERATOR_COMPRESSED.parse().unwrap();
        let uncompressed: ECPoint = GENERATOR_UNCOMPRESSED.parse().unwrap();
        assert_eq!(compressed, uncompressed);
        assert_eq!(uncompressed.to_string(), GENERATOR_COMPRESSED);
        assert_eq!(
            hex::encode(compressed.encode_uncompressed().unwrap()),
            GENERATOR_UNCOMPRESSED
        );
    }

    #[test]
    fn test_rejects_bad_lengths_and_prefixes() {
        assert!(ECPoint::from_bytes(&[]).is_err());
        assert!(ECPoint::from_bytes(&[0x02; 32]).is_err());
        let mut bad_prefix = hex::decode(GENERATOR_COMPRESSED).unwrap();
        bad_prefix[0] = 0x04;
        assert!(ECPoint::from_bytes(&bad_prefix).is_err());
    }

    #[test]
    fn test_rejects_point_off_curve() {
        let mut off_curve = hex::decode(GENERATOR_UNCOMPRESSED).unwrap();
        off_curve[64] ^= 0x01;
        assert!(matches!(ECPoint::from_bytes(&off_curve), Err(Error::InvalidPoint(_))));
    }

    #[test]
    fn test_ordering_by_x_ignores_prefix() {
        let a: ECPoint = GENERATOR_COMPRESSED.parse().unwrap();
        let b: ECPoint = "026ff03b949241ce1dadd43519e6960e0a85b41a69a05c328103aa2bce1594ca16"
            .parse()
            .unwrap();
        assert!(a < b);

        // prefix 03 sorts before prefix 02 when its X is smaller
        let c: ECPoint = "035a928f201639204e06b4368b1a93365462a8ebbff0b8818151b74faab3a2b61a"
            .parse()
            .unwrap();
        let d: ECPoint = "02550f471003f3df97c3df506ac797f6721fb1a1fb7b8f6f83d224498a65c88e24"
            .parse()
            .unwrap();
        let mut keys = vec![b, c, d];
        keys.sort();
        assert_eq!(keys, vec![d, c, b]);
    }

    #[test]
    fn test_ordering_same_x_compares_y() {
        let even: ECPoint = "026b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
            .parse()
            .unwrap();
        let odd: ECPoint = GENERATOR_COMPRESSED.parse().unwrap();
        // G has Y = 4fe3...f5, so -G has the larger Y
        assert!(odd < even);
        assert_eq!(odd.cmp(&odd), Ordering::Equal);
    }

    #[test]
    fn test_serde_hex() {
        let point: ECPoint = GENERATOR_COMPRESSED.parse().unwrap();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, format!("\"{}\"", GENERATOR_COMPRESSED));
        let parsed: ECPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, point);
    }
}
