//! Base58Check with a 4-byte double-SHA-256 checksum.

use crate::{hash::checksum, CryptoError};

/// Encodes data with a 4-byte double-SHA256 checksum using Base58Check.
pub fn base58_check_encode(data: &[u8]) -> String {
    let mut payload = Vec::with_capacity(data.len() + 4);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum(data));
    bs58::encode(payload).into_string()
}

/// Decodes a Base58Check string and strips the verified checksum.
pub fn base58_check_decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    let mut bytes = bs58::decode(text)
        .into_vec()
        .map_err(|e| CryptoError::Base58(e.to_string()))?;

    if bytes.len() < 4 {
        return Err(CryptoError::Base58(
            "decoded data is shorter than the checksum".to_string(),
        ));
    }

    let split = bytes.len() - 4;
    if checksum(&bytes[..split]) != bytes[split..] {
        return Err(CryptoError::InvalidChecksum);
    }
    bytes.truncate(split);
    Ok(bytes)
}
