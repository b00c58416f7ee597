// Copyright (C) 2015-2025 The Neo Project.
//
// binary_writer.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::IoResult;

/// An append-only little-endian writer over an owned buffer.
///
/// # Examples
///
/// ```rust
/// use neo_io::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(42).unwrap();
/// writer.write_var_string("Neo").unwrap();
///
/// assert_eq!(writer.to_bytes(), [42, 0, 0, 0, 3, b'N', b'e', b'o']);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.clone()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_bool(&mut self, value: bool) -> IoResult<()> {
        self.buffer.push(value as u8);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> IoResult<()> {
        self.buffer.push(value);
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> IoResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> IoResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> IoResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> IoResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> IoResult<()> {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes raw bytes without a length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> IoResult<()> {
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes a variable-length integer: one byte below `0xfd`, otherwise a
    /// marker byte followed by the smallest fitting u16/u32/u64.
    pub fn write_var_int(&mut self, value: u64) -> IoResult<()> {
        if value < 0xfd {
            self.write_u8(value as u8)
        } else if value <= 0xffff {
            self.write_u8(0xfd)?;
            self.write_u16(value as u16)
        } else if value <= 0xffff_ffff {
            self.write_u8(0xfe)?;
            self.write_u32(value as u32)
        } else {
            self.write_u8(0xff)?;
            self.write_u64(value)
        }
    }

    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> IoResult<()> {
        self.write_var_int(bytes.len() as u64)?;
        self.write_bytes(bytes)
    }

    pub fn write_var_string(&mut self, value: &str) -> IoResult<()> {
        self.write_var_bytes(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var_int(value: u64) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_var_int(value).unwrap();
        writer.into_bytes()
    }

    #[test]
    fn test_fixed_width_little_endian() {
        let mut writer = BinaryWriter::new();
        writer.write_u16(0x0102).unwrap();
        writer.write_u32(0x03040506).unwrap();
        writer.write_i64(-2).unwrap();
        assert_eq!(
            writer.as_bytes(),
            &[0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_var_int_boundaries() {
        assert_eq!(var_int(0xfc), vec![0xfc]);
        assert_eq!(var_int(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(var_int(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(var_int(0x10000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(var_int(0xffff_ffff), vec![0xfe, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(
            var_int(0x1_0000_0000),
            vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_var_bytes() {
        let mut writer = BinaryWriter::new();
        writer.write_var_bytes(&[0xaa, 0xbb]).unwrap();
        writer.write_var_bytes(&[]).unwrap();
        assert_eq!(writer.into_bytes(), vec![0x02, 0xaa, 0xbb, 0x00]);
    }
}
