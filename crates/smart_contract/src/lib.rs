//! # Neo Smart Contract
//!
//! Compiled contract units in the NEF (Neo Executable Format).
//!
//! ```rust
//! use neo_smart_contract::nef::NefFile;
//!
//! let nef = NefFile::create("neoc-test", None, vec![0x41, 0x9E]).unwrap();
//! let bytes = nef.to_bytes();
//! assert_eq!(bytes.len(), 80);
//!
//! let parsed = NefFile::from_bytes(&bytes).unwrap();
//! assert!(parsed.verify_checksum());
//! assert_eq!(parsed, nef);
//! ```

pub mod nef;

pub use nef::{CallFlags, MethodToken, NefFile};
