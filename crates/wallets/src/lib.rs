//! # Neo Wallets
//!
//! Password-protected key storage for Neo N3:
//!
//! - [`ScryptParameters`]: Scrypt cost presets and validation
//! - [`nep2`]: NEP-2 encryption of raw private keys
//! - [`KeyPair`]: secp256r1 keys, verification scripts and addresses
//! - [`nep6`]: the NEP-6 wallet JSON model
//!
//! ```rust
//! use neo_wallets::{decrypt_key, encrypt_key, ScryptParameters};
//!
//! let params = ScryptParameters::new(16, 1, 1, 64)?;
//! let raw_key = [0x01u8; 32];
//! let encrypted = encrypt_key(&raw_key, "correct", &params)?;
//! assert!(encrypted.as_str().starts_with("6P"));
//!
//! let decrypted = decrypt_key(&encrypted, "correct", &params)?;
//! assert_eq!(*decrypted, raw_key);
//! assert!(decrypt_key(&encrypted, "wrong", &params).unwrap_err().is_wrong_password());
//! # Ok::<(), neo_wallets::Error>(())
//! ```

pub mod helper;
pub mod key_pair;
pub mod nep2;
pub mod nep6;
pub mod scrypt_parameters;

pub use key_pair::KeyPair;
pub use nep2::{
    decrypt_key, decrypt_key_with_version, encrypt_key, encrypt_key_with_version, EncryptedKey,
};
#[cfg(feature = "async")]
pub use nep2::decrypt_key_async;
pub use nep6::{Nep6Account, Nep6Contract, Nep6Parameter, Nep6Wallet};
pub use scrypt_parameters::{scrypt_params_is_valid, ScryptParameters};

pub use neo_core::{Error, Result};
