//! AES-256 in ECB mode over block-aligned buffers, as used by NEP-2.

use aes::cipher::{generic_array::GenericArray, BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;

use crate::CryptoError;

pub const AES256_KEY_SIZE: usize = 32;

const AES_BLOCK_SIZE: usize = 16;

pub trait Aes256EcbCipher {
    fn aes256_ecb_encrypt_aligned(&self, buf: &mut [u8]) -> Result<(), CryptoError>;

    fn aes256_ecb_decrypt_aligned(&self, buf: &mut [u8]) -> Result<(), CryptoError>;
}

fn cipher_for(key: &[u8], data: &[u8]) -> Result<Aes256, CryptoError> {
    if data.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidDataLength(data.len()));
    }
    Aes256::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLength {
        expected: AES256_KEY_SIZE,
        actual: key.len(),
    })
}

impl<T: AsRef<[u8]> + ?Sized> Aes256EcbCipher for T {
    fn aes256_ecb_encrypt_aligned(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        let cipher = cipher_for(self.as_ref(), data)?;
        data.chunks_mut(AES_BLOCK_SIZE)
            .map(|chunk| GenericArray::from_mut_slice(chunk))
            .for_each(|block| cipher.encrypt_block(block));
        Ok(())
    }

    fn aes256_ecb_decrypt_aligned(&self, data: &mut [u8]) -> Result<(), CryptoError> {
        let cipher = cipher_for(self.as_ref(), data)?;
        data.chunks_mut(AES_BLOCK_SIZE)
            .map(|chunk| GenericArray::from_mut_slice(chunk))
            .for_each(|block| cipher.decrypt_block(block));
        Ok(())
    }
}
