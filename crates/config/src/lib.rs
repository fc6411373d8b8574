//! Neo Configuration Module
//!
//! Protocol constants shared by the SDK crates and the TOML-loadable
//! [`SdkSettings`] that select the network and the default key-derivation cost.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Size of a hash (UInt256) in bytes
pub const HASH_SIZE: usize = 32;
/// Size of an address (UInt160) in bytes
pub const ADDRESS_SIZE: usize = 20;
/// Size of a secp256r1 private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of a compressed secp256r1 public key in bytes
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Address version byte used by Neo N3 ("N..." addresses).
pub const DEFAULT_ADDRESS_VERSION: u8 = 0x35;

/// NEF magic, "NEF3" in little endian.
pub const NEF_MAGIC: u32 = 0x3346_454E;
/// Fixed width of the NEF compiler field.
pub const NEF_COMPILER_FIELD_SIZE: usize = 64;
/// Longest compiler string that still leaves a terminating null in the field.
pub const NEF_MAX_COMPILER_LENGTH: usize = NEF_COMPILER_FIELD_SIZE - 1;
/// Longest source URL (its length prefix is a single byte).
pub const NEF_MAX_SOURCE_LENGTH: usize = 255;
/// Longest method name referenced by a method token.
pub const NEF_MAX_METHOD_NAME_LENGTH: usize = 31;
/// Maximum number of method tokens in a NEF file.
pub const NEF_MAX_METHOD_TOKENS: usize = 128;
/// Maximum script size in bytes
pub const MAX_SCRIPT_SIZE: usize = 512_000;

/// Network type for Neo blockchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    MainNet,
    #[default]
    TestNet,
    Private,
}

impl NetworkType {
    /// Gets the network magic number
    pub fn magic(&self) -> u32 {
        match self {
            NetworkType::MainNet => 0x334f454e, // "NEO3" in little endian
            NetworkType::TestNet => 0x3554334e, // "N3T5" in little endian
            NetworkType::Private => 0x00000000,
        }
    }

    /// Gets the address version
    pub fn address_version(&self) -> u8 {
        DEFAULT_ADDRESS_VERSION
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
            NetworkType::Private => write!(f, "private"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::MainNet),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "private" | "privnet" => Ok(NetworkType::Private),
            _ => Err(ConfigError::UnknownNetwork(s.to_string())),
        }
    }
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown network type: {0}")]
    UnknownNetwork(String),

    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Raw scrypt cost settings as written in a settings file.
///
/// These are not validated here; the wallet crate checks them before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScryptSettings {
    pub n: u32,
    pub r: u32,
    pub p: u32,
    #[serde(default = "default_dklen")]
    pub dklen: u32,
}

fn default_dklen() -> u32 {
    64
}

impl Default for ScryptSettings {
    fn default() -> Self {
        Self {
            n: 16384,
            r: 8,
            p: 8,
            dklen: 64,
        }
    }
}

/// SDK settings.
///
/// ```toml
/// network = "mainnet"
///
/// [scrypt]
/// n = 4096
/// r = 8
/// p = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkSettings {
    pub network: NetworkType,
    /// Overrides the network's address version when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_version: Option<u8>,
    pub scrypt: ScryptSettings,
}

impl SdkSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Address version in effect for these settings.
    pub fn address_version(&self) -> u8 {
        self.address_version
            .unwrap_or_else(|| self.network.address_version())
    }
}
