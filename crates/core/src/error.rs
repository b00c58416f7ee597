// Copyright (C) 2015-2025 The Neo Project.
//
// error.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Error types for the Neo Core crate.

use neo_io::IoError;
use thiserror::Error;

/// Core module errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An argument was outside its domain
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },

    /// Encoded input did not follow the expected format
    #[error("Invalid format: {message}")]
    InvalidFormat {
        /// Description of the format issue
        message: String,
    },

    /// A collection exceeded its size limit
    #[error("Invalid size: {message}")]
    InvalidSize {
        /// Description of the exceeded limit
        message: String,
    },

    /// The operation is not allowed in the object's current state
    #[error("Invalid state: {message}")]
    State {
        /// Description of the conflicting state
        message: String,
    },

    /// Cryptographic operation failed
    #[error("Cryptographic error: {message}")]
    Cryptographic {
        /// Description of the cryptographic issue
        message: String,
    },

    /// Encoding or decoding on the wire failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl CoreError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    pub fn invalid_size(message: impl Into<String>) -> Self {
        Self::InvalidSize {
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }
}

impl From<neo_cryptography::Error> for CoreError {
    fn from(error: neo_cryptography::Error) -> Self {
        CoreError::Cryptographic {
            message: error.to_string(),
        }
    }
}

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;
