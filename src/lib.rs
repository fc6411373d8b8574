//! # Neo SDK
//!
//! Client-side building blocks for Neo N3:
//!
//! - [`smart_contract::nef`]: read, write and checksum NEF contract files
//! - [`wallets`]: Scrypt parameters, NEP-2 encrypted keys and NEP-6 wallets
//!
//! ## Quick Start
//!
//! ```rust
//! use neo_sdk::prelude::*;
//!
//! # fn main() -> neo_sdk::Result<()> {
//! let mut nef = NefFile::create("neon-3.6.0", None, vec![0x11, 0x40])?;
//! nef.add_method_token(UInt160::zero(), "transfer", 4, true, CallFlags::ALL)?;
//! let parsed = NefFile::from_bytes(&nef.to_bytes())?;
//! assert!(parsed.verify_checksum());
//!
//! let params = ScryptParameters::new(16, 1, 1, 64)?;
//! let encrypted = encrypt_key(&[0x01; 32], "correct", &params)?;
//! assert_eq!(*encrypted.decrypt("correct")?, [0x01; 32]);
//! # Ok(())
//! # }
//! ```

pub use neo_config as config;
pub use neo_core as core;
pub use neo_cryptography as crypto;
pub use neo_io as io;
pub use neo_smart_contract as smart_contract;
pub use neo_wallets as wallets;

pub use neo_core::{Error, Result};

pub mod logging;

/// Common imports for SDK users.
pub mod prelude {
    pub use crate::config::{NetworkType, SdkSettings};
    pub use crate::core::{Error, UInt160};
    pub use crate::smart_contract::{CallFlags, MethodToken, NefFile};
    pub use crate::wallets::{
        decrypt_key, encrypt_key, scrypt_params_is_valid, EncryptedKey, KeyPair, Nep6Wallet,
        ScryptParameters,
    };
}
