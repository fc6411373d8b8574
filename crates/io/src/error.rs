use thiserror::Error;

/// Errors raised while decoding the Neo binary format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("length {len} exceeds maximum {max}")]
    LengthOutOfRange { len: u64, max: u64 },

    #[error("non-canonical var-int with tag {0:#04x}")]
    InvalidVarInt(u8),

    #[error("invalid value for {0}")]
    InvalidValue(&'static str),

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    #[error("failed to allocate {0} bytes")]
    OutOfMemory(usize),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<IoError> for neo_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::OutOfMemory(_) => neo_core::Error::OutOfMemory,
            _ => neo_core::Error::InvalidFormat(err.to_string()),
        }
    }
}
