use thiserror::Error;

/// Failures of the primitive operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid secp256r1 private key")]
    InvalidPrivateKey,

    #[error("scrypt: invalid params {0}")]
    InvalidScryptParams(String),

    #[error("scrypt: {params} needs {required} bytes, limit is {limit}")]
    ScryptMemoryLimit {
        params: String,
        required: u64,
        limit: u64,
    },

    #[error("scrypt: invalid derived length {0}")]
    InvalidDerivedLength(usize),

    #[error("aes-ecb: data length {0} is not a multiple of the block size")]
    InvalidDataLength(usize),

    #[error("base58: {0}")]
    Base58(String),

    #[error("base58check: invalid checksum")]
    InvalidChecksum,
}

impl From<CryptoError> for neo_core::Error {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Base58(_) | CryptoError::InvalidChecksum => {
                neo_core::Error::InvalidFormat(err.to_string())
            }
            CryptoError::ScryptMemoryLimit { .. } => neo_core::Error::OutOfMemory,
            _ => neo_core::Error::CryptoError(err.to_string()),
        }
    }
}
