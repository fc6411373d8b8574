//! NEP-2 password-protected private keys.
//!
//! ```text
//! Base58Check( 0x01 0x42 | 0xE0 | address_hash[4] | AES256-ECB(key ^ derived[..32], derived[32..]) )
//! ```
//!
//! `derived` is 64 bytes of Scrypt(password, address_hash, N, r, p), and
//! `address_hash` is the first four bytes of Hash256 over the ASCII address
//! of the key. Passwords are used as raw UTF-8 without normalization.

use std::fmt;

use neo_config::{DEFAULT_ADDRESS_VERSION, PRIVATE_KEY_SIZE};
use neo_core::{Error, Result};
use neo_cryptography::aes::Aes256EcbCipher;
use neo_cryptography::base58::{base58_check_decode, base58_check_encode};
use neo_cryptography::hash::hash256;
use neo_cryptography::scrypt::DeriveScryptKey;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use crate::{KeyPair, ScryptParameters};

const NEP2_PREFIX: [u8; 2] = [0x01, 0x42];
const NEP2_FLAG: u8 = 0xE0;
const NEP2_KEY_SIZE: usize = 39;
const ADDRESS_HASH_SIZE: usize = 4;
const DERIVED_KEY_SIZE: usize = 2 * PRIVATE_KEY_SIZE;

/// An encrypted private key and the Scrypt parameters it was wrapped with.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKey {
    key: String,
    scrypt: ScryptParameters,
}

impl EncryptedKey {
    pub fn new(key: impl Into<String>, scrypt: ScryptParameters) -> Self {
        Self {
            key: key.into(),
            scrypt,
        }
    }

    /// The Base58Check NEP-2 string (`6P...`).
    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn scrypt(&self) -> &ScryptParameters {
        &self.scrypt
    }

    /// Decrypts with the parameters stored alongside the key.
    pub fn decrypt(&self, password: &str) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
        decrypt_key(self, password, &self.scrypt)
    }
}

impl fmt::Debug for EncryptedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedKey")
            .field("scrypt", &self.scrypt)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for EncryptedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Wraps a raw 32-byte private key under `password`.
pub fn encrypt_key(
    raw_key: &[u8],
    password: &str,
    params: &ScryptParameters,
) -> Result<EncryptedKey> {
    encrypt_key_with_version(raw_key, password, params, DEFAULT_ADDRESS_VERSION)
}

/// Like [`encrypt_key`], salting with the address for `version`.
pub fn encrypt_key_with_version(
    raw_key: &[u8],
    password: &str,
    params: &ScryptParameters,
    version: u8,
) -> Result<EncryptedKey> {
    params.ensure_valid()?;
    let key_pair = KeyPair::from_private_key(raw_key)?;
    let address_hash = address_hash(&key_pair.address_with_version(version));

    let derived = derive(password, &address_hash, params)?;
    let (half1, half2) = derived.split_at(PRIVATE_KEY_SIZE);

    let mut block = Zeroizing::new(*key_pair.private_key());
    xor_in_place(block.as_mut_slice(), half1);
    half2.aes256_ecb_encrypt_aligned(block.as_mut_slice())?;

    let mut data = [0u8; NEP2_KEY_SIZE];
    data[..2].copy_from_slice(&NEP2_PREFIX);
    data[2] = NEP2_FLAG;
    data[3..7].copy_from_slice(&address_hash);
    data[7..].copy_from_slice(block.as_slice());

    Ok(EncryptedKey::new(base58_check_encode(&data), *params))
}

/// Recovers the raw private key, deriving with `params`.
///
/// A password that does not reproduce the embedded address hash is
/// `WrongPassword`; a string that is not a NEP-2 key is `InvalidFormat`.
pub fn decrypt_key(
    encrypted: &EncryptedKey,
    password: &str,
    params: &ScryptParameters,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    decrypt_key_with_version(encrypted, password, params, DEFAULT_ADDRESS_VERSION)
}

pub fn decrypt_key_with_version(
    encrypted: &EncryptedKey,
    password: &str,
    params: &ScryptParameters,
    version: u8,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    params.ensure_valid()?;
    let data = base58_check_decode(encrypted.as_str())?;
    if data.len() != NEP2_KEY_SIZE || data[..2] != NEP2_PREFIX || data[2] != NEP2_FLAG {
        return Err(Error::invalid_format("not a NEP-2 key"));
    }

    let mut expected_hash = [0u8; ADDRESS_HASH_SIZE];
    expected_hash.copy_from_slice(&data[3..7]);

    let derived = derive(password, &expected_hash, params)?;
    let (half1, half2) = derived.split_at(PRIVATE_KEY_SIZE);

    let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    private_key.copy_from_slice(&data[7..]);
    half2.aes256_ecb_decrypt_aligned(private_key.as_mut_slice())?;
    xor_in_place(private_key.as_mut_slice(), half1);

    // A wrong password almost always yields a valid scalar, but not always.
    let key_pair = match KeyPair::from_private_key(private_key.as_slice()) {
        Ok(key_pair) => key_pair,
        Err(_) => {
            debug!("NEP-2 password rejected: decrypted scalar out of range");
            return Err(Error::WrongPassword);
        }
    };

    let actual_hash = address_hash(&key_pair.address_with_version(version));
    if !bool::from(actual_hash[..].ct_eq(&expected_hash[..])) {
        debug!("NEP-2 password rejected: address hash mismatch");
        return Err(Error::WrongPassword);
    }

    Ok(private_key)
}

/// Runs [`decrypt_key`] on the tokio blocking pool.
#[cfg(feature = "async")]
pub async fn decrypt_key_async(
    encrypted: EncryptedKey,
    password: String,
    params: ScryptParameters,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_SIZE]>> {
    let password = Zeroizing::new(password);
    tokio::task::spawn_blocking(move || decrypt_key(&encrypted, &password, &params))
        .await
        .map_err(|e| Error::crypto(format!("key derivation task failed: {e}")))?
}

fn address_hash(address: &str) -> [u8; ADDRESS_HASH_SIZE] {
    let hash = hash256(address.as_bytes());
    let mut out = [0u8; ADDRESS_HASH_SIZE];
    out.copy_from_slice(&hash[..ADDRESS_HASH_SIZE]);
    out
}

fn derive(
    password: &str,
    salt: &[u8],
    params: &ScryptParameters,
) -> Result<Zeroizing<[u8; DERIVED_KEY_SIZE]>> {
    Ok(password
        .as_bytes()
        .derive_scrypt_key::<DERIVED_KEY_SIZE>(salt, params.to_scrypt_params())?)
}

fn xor_in_place(target: &mut [u8], mask: &[u8]) {
    for (byte, m) in target.iter_mut().zip(mask) {
        *byte ^= *m;
    }
}
