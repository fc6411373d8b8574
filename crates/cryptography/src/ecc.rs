//! secp256r1 key handling.

use p256::elliptic_curve::sec1::ToEncodedPoint;
use neo_config::{COMPRESSED_PUBLIC_KEY_SIZE, PRIVATE_KEY_SIZE};
use p256::SecretKey;

use crate::CryptoError;

/// Derives the compressed SEC1 public key of a 32-byte big-endian private key.
pub fn compressed_public_key(
    private_key: &[u8],
) -> Result<[u8; COMPRESSED_PUBLIC_KEY_SIZE], CryptoError> {
    if private_key.len() != PRIVATE_KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength {
            expected: PRIVATE_KEY_SIZE,
            actual: private_key.len(),
        });
    }
    let secret = SecretKey::from_slice(private_key).map_err(|_| CryptoError::InvalidPrivateKey)?;
    let point = secret.public_key().to_encoded_point(true);

    let mut compressed = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
    compressed.copy_from_slice(point.as_bytes());
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_compressed_public_key() {
        let private_key = [0x01u8; 32];
        let public_key = compressed_public_key(&private_key).unwrap();
        assert_eq!(
            hex::encode(public_key),
            "026ff03b949241ce1dadd43519e6960e0a85b41a69a05c328103aa2bce1594ca16"
        );
        assert_eq!(public_key.len(), COMPRESSED_PUBLIC_KEY_SIZE);
        assert!(p256::PublicKey::from_sec1_bytes(&public_key).is_ok());
    }

    #[test]
    fn test_second_vector() {
        let private_key = hex!("7d128a6d096f0c14c3a25a2b0c41cf79661bfcb4a8cc95aaaea28bde4d732344");
        assert_eq!(
            hex::encode(compressed_public_key(&private_key).unwrap()),
            "02028a99826edc0c97d18e22b6932373d908d323aa7f92656a77ec26e8861699ef"
        );
    }

    #[test]
    fn test_invalid_private_keys() {
        assert_eq!(
            compressed_public_key(&[0xFFu8; 32]),
            Err(CryptoError::InvalidPrivateKey)
        );
        assert_eq!(
            compressed_public_key(&[0u8; 32]),
            Err(CryptoError::InvalidPrivateKey)
        );
        assert_eq!(
            compressed_public_key(&[1u8; 33]),
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 33
            })
        );
    }
}
