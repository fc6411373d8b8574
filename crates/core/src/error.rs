//! Error taxonomy shared by the NEF codec and the key store.

use thiserror::Error;

/// Errors returned by SDK operations.
///
/// Every failure is local to the call and recoverable by the caller; nothing
/// here is fatal to the hosting process.
#[derive(Error, Debug)]
pub enum Error {
    /// A parameter is missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A field exceeds its fixed capacity.
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Parse-time structural violation (bad magic, truncated buffer, oversized length prefix).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// The underlying KDF, cipher or curve primitive failed.
    #[error("Cryptography error: {0}")]
    CryptoError(String),

    /// The post-decryption integrity check failed.
    #[error("Wrong password")]
    WrongPassword,

    #[error("Out of memory")]
    OutOfMemory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn invalid_size<S: Into<String>>(message: S) -> Self {
        Self::InvalidSize(message.into())
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::CryptoError(message.into())
    }

    /// Whether the caller may simply ask the user for the password again.
    pub fn is_wrong_password(&self) -> bool {
        matches!(self, Self::WrongPassword)
    }
}

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, Error>;
