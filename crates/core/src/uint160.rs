//! Implementation of `UInt160`, a 160-bit script hash.

use crate::{Error, Result};
use neo_config::ADDRESS_SIZE;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of `UInt160` values in bytes.
pub const UINT160_SIZE: usize = ADDRESS_SIZE;

/// A 160-bit hash, stored little-endian as it appears on the wire.
///
/// The textual form is `0x`-prefixed big-endian hex, matching how Neo tools
/// print contract and account hashes.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct UInt160([u8; UINT160_SIZE]);

impl UInt160 {
    pub const LENGTH: usize = UINT160_SIZE;

    #[inline]
    pub const fn new(bytes: [u8; UINT160_SIZE]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self([0u8; UINT160_SIZE])
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Creates a `UInt160` from exactly 20 little-endian bytes.
    pub fn from_bytes(value: &[u8]) -> Result<Self> {
        let bytes: [u8; UINT160_SIZE] = value.try_into().map_err(|_| {
            Error::invalid_argument(format!(
                "UInt160 requires {} bytes, got {}",
                UINT160_SIZE,
                value.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    #[inline]
    pub fn to_array(&self) -> [u8; UINT160_SIZE] {
        self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    /// Parses `0x`-prefixed (or bare) big-endian hex.
    pub fn parse(s: &str) -> Result<Self> {
        let hex_str = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if hex_str.len() != UINT160_SIZE * 2 {
            return Err(Error::invalid_format(format!("invalid UInt160 string: {s}")));
        }
        let mut bytes = [0u8; UINT160_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes)
            .map_err(|e| Error::invalid_format(format!("invalid UInt160 string: {e}")))?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for UInt160 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(bytes: [u8; UINT160_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        write!(f, "0x{}", hex::encode(reversed))
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({self})")
    }
}

impl FromStr for UInt160 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for UInt160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt160 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
