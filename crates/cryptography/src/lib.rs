//! Cryptographic primitives for the Neo SDK.
//!
//! Thin, allocation-light wrappers over the RustCrypto crates:
//!
//! - [`hash`]: SHA-256, RIPEMD-160, Hash160 and Hash256 (double SHA-256)
//! - [`base58`]: Base58Check with the Neo double-SHA-256 checksum
//! - [`scrypt`]: password-based key derivation
//! - [`aes`]: AES-256 in ECB mode over whole blocks
//! - [`ecc`]: secp256r1 private/public key handling

pub mod aes;
pub mod base58;
pub mod ecc;
pub mod error;
pub mod hash;
pub mod scrypt;

pub use error::CryptoError;
