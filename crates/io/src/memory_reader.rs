// Copyright (C) 2015-2025 The Neo Project.
//
// memory_reader.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::push_op;
use crate::{IoError, IoResult};
use byteorder::{ByteOrder, LittleEndian};
use std::mem::size_of;

/// A cursor over a borrowed byte slice that decodes the Neo wire format.
pub struct MemoryReader<'a> {
    memory: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        Self { memory, pos: 0 }
    }

    #[inline(always)]
    fn ensure_position(&self, move_by: usize) -> IoResult<()> {
        match self.pos.checked_add(move_by) {
            Some(end) if end <= self.memory.len() => Ok(()),
            _ => Err(IoError::UnexpectedEof),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.memory.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline(always)]
    pub fn peek(&self) -> IoResult<u8> {
        self.ensure_position(1)?;
        Ok(self.memory[self.pos])
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(IoError::invalid_data("Invalid boolean value")),
        }
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure_position(1)?;
        let value = self.memory[self.pos];
        self.pos += 1;
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> IoResult<u16> {
        self.ensure_position(size_of::<u16>())?;
        let value = LittleEndian::read_u16(&self.memory[self.pos..]);
        self.pos += size_of::<u16>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> IoResult<u32> {
        self.ensure_position(size_of::<u32>())?;
        let value = LittleEndian::read_u32(&self.memory[self.pos..]);
        self.pos += size_of::<u32>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_i32(&mut self) -> IoResult<i32> {
        self.ensure_position(size_of::<i32>())?;
        let value = LittleEndian::read_i32(&self.memory[self.pos..]);
        self.pos += size_of::<i32>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u64(&mut self) -> IoResult<u64> {
        self.ensure_position(size_of::<u64>())?;
        let value = LittleEndian::read_u64(&self.memory[self.pos..]);
        self.pos += size_of::<u64>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_i64(&mut self) -> IoResult<i64> {
        self.ensure_position(size_of::<i64>())?;
        let value = LittleEndian::read_i64(&self.memory[self.pos..]);
        self.pos += size_of::<i64>();
        Ok(value)
    }

    /// Reads a variable-length integer, rejecting values above `max` and
    /// encodings longer than necessary.
    pub fn read_var_int(&mut self, max: u64) -> IoResult<u64> {
        let b = self.read_u8()?;
        let value = match b {
            0xfd => {
                let v = self.read_u16()? as u64;
                if v < 0xfd {
                    return Err(IoError::invalid_data("Non-canonical VarInt"));
                }
                v
            }
            0xfe => {
                let v = self.read_u32()? as u64;
                if v <= 0xffff {
                    return Err(IoError::invalid_data("Non-canonical VarInt"));
                }
                v
            }
            0xff => {
                let v = self.read_u64()?;
                if v <= 0xffff_ffff {
                    return Err(IoError::invalid_data("Non-canonical VarInt"));
                }
                v
            }
            _ => b as u64,
        };
        if value > max {
            return Err(IoError::invalid_data(format!(
                "VarInt {} exceeds maximum value {}",
                value, max
            )));
        }
        Ok(value)
    }

    #[inline(always)]
    pub fn read_memory(&mut self, count: usize) -> IoResult<&'a [u8]> {
        self.ensure_position(count)?;
        let result = &self.memory[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    pub fn read_bytes(&mut self, count: usize) -> IoResult<Vec<u8>> {
        self.read_memory(count).map(|bytes| bytes.to_vec())
    }

    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        let length = self.read_var_int(max as u64)? as usize;
        self.read_bytes(length)
    }

    pub fn read_var_string(&mut self, max: usize) -> IoResult<String> {
        let length = self.read_var_int(max as u64)? as usize;
        let data = self.read_memory(length)?;
        String::from_utf8(data.to_vec()).map_err(|_| IoError::invalid_data("Invalid UTF-8 sequence"))
    }

    #[inline(always)]
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let result = &self.memory[self.pos..];
        self.pos = self.memory.len();
        result
    }

    /// Reads a PUSHDATA1/2/4 instruction and returns its payload.
    pub fn read_push_data(&mut self) -> IoResult<Vec<u8>> {
        let op = self.read_u8()?;
        self.read_push_data_body(op)
    }

    fn read_push_data_body(&mut self, op: u8) -> IoResult<Vec<u8>> {
        let length = match op {
            push_op::PUSHDATA1 => self.read_u8()? as usize,
            push_op::PUSHDATA2 => self.read_u16()? as usize,
            push_op::PUSHDATA4 => {
                let length = self.read_u32()? as usize;
                if length > self.remaining() {
                    return Err(IoError::invalid_data("PUSHDATA4 length exceeds script"));
                }
                length
            }
            _ => {
                return Err(IoError::invalid_data(format!(
                    "Expected PUSHDATA instruction, found 0x{:02x}",
                    op
                )))
            }
        };
        self.read_bytes(length)
    }

    /// Reads an instruction that pushes an integer.
    ///
    /// Accepts PUSHM1, PUSH0..PUSH16, PUSHINT8..PUSHINT64 and PUSHDATA
    /// carrying at most eight bytes of signed little-endian data.
    pub fn read_push_integer(&mut self) -> IoResult<i64> {
        let op = self.read_u8()?;
        match op {
            push_op::PUSHM1 => Ok(-1),
            push_op::PUSH0..=push_op::PUSH16 => Ok((op - push_op::PUSH0) as i64),
            push_op::PUSHINT8 => Ok(self.read_u8()? as i8 as i64),
            push_op::PUSHINT16 => Ok(self.read_u16()? as i16 as i64),
            push_op::PUSHINT32 => Ok(self.read_i32()? as i64),
            push_op::PUSHINT64 => self.read_i64(),
            push_op::PUSHDATA1 | push_op::PUSHDATA2 | push_op::PUSHDATA4 => {
                let data = self.read_push_data_body(op)?;
                signed_le_to_i64(&data)
            }
            _ => Err(IoError::invalid_data(format!(
                "Expected integer push instruction, found 0x{:02x}",
                op
            ))),
        }
    }

    /// Reads PUSHT/PUSHF or PUSH0/PUSH1 as a boolean.
    pub fn read_push_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            push_op::PUSHT => Ok(true),
            push_op::PUSHF => Ok(false),
            op if op == push_op::PUSH0 => Ok(false),
            op if op == push_op::PUSH0 + 1 => Ok(true),
            op => Err(IoError::invalid_data(format!(
                "Expected boolean push instruction, found 0x{:02x}",
                op
            ))),
        }
    }
}

fn signed_le_to_i64(data: &[u8]) -> IoResult<i64> {
    if data.len() > size_of::<i64>() {
        return Err(IoError::invalid_data("Pushed integer does not fit in 64 bits"));
    }
    let Some(&last) = data.last() else {
        return Ok(0);
    };
    let fill = if last & 0x80 != 0 { 0xff } else { 0x00 };
    let mut buf = [fill; 8];
    buf[..data.len()].copy_from_slice(data);
    Ok(i64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width() {
        let data = [0x01, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut reader = MemoryReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_u16().unwrap(), 2);
        assert_eq!(reader.read_u32().unwrap(), 3);
        assert!(reader.is_empty());
        assert_eq!(reader.read_u8(), Err(IoError::UnexpectedEof));
    }

    #[test]
    fn test_read_var_int_max() {
        let data = [0xfd, 0x00, 0x01];
        let mut reader = MemoryReader::new(&data);
        assert!(matches!(reader.read_var_int(0xff), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_read_var_int_non_canonical() {
        let data = [0xfd, 0x10, 0x00];
        let mut reader = MemoryReader::new(&data);
        assert!(reader.read_var_int(u64::MAX).is_err());
    }

    #[test]
    fn test_read_var_bytes_truncated() {
        let data = [0x05, 0x01, 0x02];
        let mut reader = MemoryReader::new(&data);
        assert_eq!(reader.read_var_bytes(100), Err(IoError::UnexpectedEof));
    }

    #[test]
    fn test_read_push_data() {
        let data = [0x0c, 0x02, 0xaa, 0xbb, 0x0d, 0x01, 0x00, 0xcc];
        let mut reader = MemoryReader::new(&data);
        assert_eq!(reader.read_push_data().unwrap(), vec![0xaa, 0xbb]);
        assert_eq!(reader.read_push_data().unwrap(), vec![0xcc]);
    }

    #[test]
    fn test_read_push_data_rejects_other_opcode() {
        let data = [0x10];
        let mut reader = MemoryReader::new(&data);
        assert!(matches!(reader.read_push_data(), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_read_push_data4_oversized_length() {
        let data = [0x0e, 0xff, 0xff, 0xff, 0x7f, 0x00];
        let mut reader = MemoryReader::new(&data);
        assert!(reader.read_push_data().is_err());
    }

    #[test]
    fn test_read_push_integer_forms() {
        let data = [
            0x0f, // PUSHM1
            0x10, // PUSH0
            0x20, // PUSH16
            0x00, 0x80, // PUSHINT8 -128
            0x01, 0x00, 0x01, // PUSHINT16 256
            0x0c, 0x02, 0xe8, 0x03, // PUSHDATA1 1000
            0x0c, 0x01, 0xff, // PUSHDATA1 -1
            0x0c, 0x00, // PUSHDATA1 empty
        ];
        let mut reader = MemoryReader::new(&data);
        assert_eq!(reader.read_push_integer().unwrap(), -1);
        assert_eq!(reader.read_push_integer().unwrap(), 0);
        assert_eq!(reader.read_push_integer().unwrap(), 16);
        assert_eq!(reader.read_push_integer().unwrap(), -128);
        assert_eq!(reader.read_push_integer().unwrap(), 256);
        assert_eq!(reader.read_push_integer().unwrap(), 1000);
        assert_eq!(reader.read_push_integer().unwrap(), -1);
        assert_eq!(reader.read_push_integer().unwrap(), 0);
    }

    #[test]
    fn test_read_push_bool() {
        let data = [0x08, 0x09, 0x11, 0x10];
        let mut reader = MemoryReader::new(&data);
        assert!(reader.read_push_bool().unwrap());
        assert!(!reader.read_push_bool().unwrap());
        assert!(reader.read_push_bool().unwrap());
        assert!(!reader.read_push_bool().unwrap());
    }
}
