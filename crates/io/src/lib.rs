// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Neo.IO
//!
//! Little-endian fixed-width and variable-length encoding used by every
//! structure on the Neo N3 wire, plus parsing of script push instructions.

mod binary_writer;
mod error;
mod memory_reader;
pub mod serializable;

pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use memory_reader::MemoryReader;
pub use serializable::{helper, Serializable, SerializableExt};

/// Push instruction bytes understood by [`MemoryReader::read_push_data`] and
/// [`MemoryReader::read_push_integer`].
pub mod push_op {
    pub const PUSHINT8: u8 = 0x00;
    pub const PUSHINT16: u8 = 0x01;
    pub const PUSHINT32: u8 = 0x02;
    pub const PUSHINT64: u8 = 0x03;
    pub const PUSHT: u8 = 0x08;
    pub const PUSHF: u8 = 0x09;
    pub const PUSHDATA1: u8 = 0x0C;
    pub const PUSHDATA2: u8 = 0x0D;
    pub const PUSHDATA4: u8 = 0x0E;
    pub const PUSHM1: u8 = 0x0F;
    pub const PUSH0: u8 = 0x10;
    pub const PUSH16: u8 = 0x20;
}
