// Copyright (C) 2015-2025 The Neo Project.
//
// serializable.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Serialization traits and utilities for Neo objects.

use crate::{BinaryWriter, IoResult, MemoryReader};

/// Represents NEO objects that can be serialized.
pub trait Serializable {
    /// The size of the object in bytes after serialization.
    fn size(&self) -> usize;

    /// Serializes the object using the specified BinaryWriter.
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()>;

    /// Deserializes the object using the specified MemoryReader.
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self>
    where
        Self: Sized;
}

/// Extension methods for serializable objects.
pub trait SerializableExt: Serializable {
    /// Converts the object to a byte array.
    fn to_array(&self) -> IoResult<Vec<u8>> {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Creates an object from a byte array. Trailing bytes are rejected.
    fn from_array(data: &[u8]) -> IoResult<Self>
    where
        Self: Sized,
    {
        let mut reader = MemoryReader::new(data);
        let value = Self::deserialize(&mut reader)?;
        if !reader.is_empty() {
            return Err(crate::IoError::invalid_data("Trailing bytes after object"));
        }
        Ok(value)
    }
}

impl<T: Serializable> SerializableExt for T {}

/// Helper functions for serialization.
pub mod helper {
    use super::Serializable;
    use crate::{BinaryWriter, IoResult, MemoryReader};

    /// Serializes a collection of serializable objects.
    pub fn serialize_array<T: Serializable>(
        items: &[T],
        writer: &mut BinaryWriter,
    ) -> IoResult<()> {
        writer.write_var_int(items.len() as u64)?;
        for item in items {
            item.serialize(writer)?;
        }
        Ok(())
    }

    /// Deserializes a collection of serializable objects.
    pub fn deserialize_array<T: Serializable>(
        reader: &mut MemoryReader,
        max: usize,
    ) -> IoResult<Vec<T>> {
        let count = reader.read_var_int(max as u64)? as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::deserialize(reader)?);
        }
        Ok(items)
    }

    /// Gets the size of a serialized array.
    pub fn get_array_size<T: Serializable>(items: &[T]) -> usize {
        items
            .iter()
            .fold(get_var_size(items.len() as u64), |size, item| size + item.size())
    }

    /// Gets the size of a variable-length integer.
    pub fn get_var_size(value: u64) -> usize {
        if value < 0xFD {
            1
        } else if value <= 0xFFFF {
            3
        } else if value <= 0xFFFFFFFF {
            5
        } else {
            9
        }
    }

    /// Gets the size of a length-prefixed byte string.
    pub fn get_var_bytes_size(bytes: &[u8]) -> usize {
        get_var_size(bytes.len() as u64) + bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryWriter, IoError, IoResult, MemoryReader};

    #[derive(Debug, PartialEq)]
    struct Height {
        value: u32,
    }

    impl Serializable for Height {
        fn size(&self) -> usize {
            4
        }

        fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
            writer.write_u32(self.value)
        }

        fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
            Ok(Height {
                value: reader.read_u32()?,
            })
        }
    }

    #[test]
    fn test_from_array_rejects_trailing_bytes() {
        let err = Height::from_array(&[1, 0, 0, 0, 9]).unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));
        assert_eq!(Height::from_array(&[1, 0, 0, 0]).unwrap(), Height { value: 1 });
    }

    #[test]
    fn test_serialize_array() {
        let items = vec![Height { value: 1 }, Height { value: 2 }];

        let mut writer = BinaryWriter::new();
        helper::serialize_array(&items, &mut writer).unwrap();
        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), helper::get_array_size(&items));

        let mut reader = MemoryReader::new(&bytes);
        let decoded: Vec<Height> = helper::deserialize_array(&mut reader, 16).unwrap();
        assert_eq!(items, decoded);
    }

    #[test]
    fn test_deserialize_array_over_limit() {
        let bytes = [0x03, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut reader = MemoryReader::new(&bytes);
        assert!(helper::deserialize_array::<Height>(&mut reader, 2).is_err());
    }

    #[test]
    fn test_get_var_size() {
        assert_eq!(helper::get_var_size(0), 1);
        assert_eq!(helper::get_var_size(252), 1);
        assert_eq!(helper::get_var_size(253), 3);
        assert_eq!(helper::get_var_size(u16::MAX as u64), 3);
        assert_eq!(helper::get_var_size(65536), 5);
        assert_eq!(helper::get_var_size(0xFFFFFFFF), 5);
        assert_eq!(helper::get_var_size(0x100000000), 9);
    }
}
