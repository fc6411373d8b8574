//! secp256r1 key pairs and the accounts they control.

use std::fmt;

use neo_config::{COMPRESSED_PUBLIC_KEY_SIZE, DEFAULT_ADDRESS_VERSION, PRIVATE_KEY_SIZE};
use neo_core::{Error, Result, UInt160};
use neo_cryptography::ecc;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::helper::{
    create_signature_redeem_script, script_hash, to_address, SIGNATURE_REDEEM_SCRIPT_SIZE,
};

/// A private key together with its compressed public key.
///
/// The private key is wiped from memory when the pair is dropped.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<[u8; PRIVATE_KEY_SIZE]>,
    public_key: [u8; COMPRESSED_PUBLIC_KEY_SIZE],
}

impl KeyPair {
    /// Builds a key pair from a 32-byte big-endian scalar.
    ///
    /// Wrong length is `InvalidArgument`; a scalar outside `[1, n)` is `CryptoError`.
    pub fn from_private_key(private_key: &[u8]) -> Result<Self> {
        if private_key.len() != PRIVATE_KEY_SIZE {
            return Err(Error::invalid_argument(format!(
                "private key must be {} bytes, got {}",
                PRIVATE_KEY_SIZE,
                private_key.len()
            )));
        }
        let public_key = ecc::compressed_public_key(private_key)?;
        let mut secret = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        secret.copy_from_slice(private_key);
        Ok(Self {
            private_key: secret,
            public_key,
        })
    }

    /// Generates a fresh key pair from the operating system RNG.
    pub fn generate() -> Self {
        let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        loop {
            OsRng.fill_bytes(candidate.as_mut_slice());
            if let Ok(pair) = Self::from_private_key(candidate.as_slice()) {
                return pair;
            }
        }
    }

    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        &self.public_key
    }

    /// Single-signature verification script for this key.
    pub fn verification_script(&self) -> [u8; SIGNATURE_REDEEM_SCRIPT_SIZE] {
        create_signature_redeem_script(&self.public_key)
    }

    pub fn script_hash(&self) -> UInt160 {
        script_hash(&self.verification_script())
    }

    /// N3 address using the default version byte.
    pub fn address(&self) -> String {
        self.address_with_version(DEFAULT_ADDRESS_VERSION)
    }

    pub fn address_with_version(&self, version: u8) -> String {
        to_address(&self.script_hash(), version)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.public_key))
    }
}
