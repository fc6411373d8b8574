//! # Neo Core
//!
//! Types shared by every crate of the SDK:
//!
//! - [`Error`] / [`Result`]: the single error taxonomy returned by the NEF codec
//!   and the key store.
//! - [`UInt160`]: a 20-byte script hash.

pub mod error;
pub mod uint160;

pub use error::{Error, Result};
pub use uint160::UInt160;
