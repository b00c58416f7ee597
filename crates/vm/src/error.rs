//! Error types for script assembly and inspection.

use neo_io::IoError;
use thiserror::Error;

/// Errors raised while building or parsing NeoVM scripts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid script: {0}")]
    InvalidScript(String),

    #[error("Invalid opcode: 0x{0:02x}")]
    InvalidOpCode(u8),

    #[error("IO error: {0}")]
    Io(#[from] IoError),
}

impl VmError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn invalid_script(message: impl Into<String>) -> Self {
        Self::InvalidScript(message.into())
    }
}

/// Result type for VM operations.
pub type VmResult<T> = std::result::Result<T, VmError>;
