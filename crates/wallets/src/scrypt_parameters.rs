//! Scrypt cost parameters for wallet key wrapping.

use std::fmt;

use neo_config::ScryptSettings;
use neo_core::{Error, Result};
use neo_cryptography::scrypt::{DeriveScryptKey, ScryptParams};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Scrypt parameters as stored in the `scrypt` object of a NEP-6 wallet.
///
/// Values read from a file are not validated on deserialization; check
/// them with [`scrypt_params_is_valid`] before deriving anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScryptParameters {
    /// CPU/memory cost parameter (N).
    pub n: u32,

    /// Block size parameter (r).
    pub r: u32,

    /// Parallelization parameter (p).
    pub p: u32,

    /// Output length of [`ScryptParameters::derive_key`].
    #[serde(rename = "dklen", default = "default_derived_key_length")]
    pub derived_key_length: u32,
}

fn default_derived_key_length() -> u32 {
    64
}

impl ScryptParameters {
    /// NEP-2 reference parameters.
    pub const DEFAULT: Self = Self {
        n: 16384,
        r: 8,
        p: 8,
        derived_key_length: 64,
    };

    /// Cheaper parameters for constrained clients.
    pub const LIGHT: Self = Self {
        n: 4096,
        r: 8,
        p: 2,
        derived_key_length: 32,
    };

    pub const STANDARD: Self = Self {
        n: 32768,
        r: 8,
        p: 16,
        derived_key_length: 64,
    };

    /// Creates validated parameters. Inputs are rejected, never adjusted.
    pub fn new(n: u32, r: u32, p: u32, derived_key_length: u32) -> Result<Self> {
        if n == 0 || !n.is_power_of_two() {
            return Err(Error::invalid_argument(format!(
                "scrypt N must be a nonzero power of two, got {n}"
            )));
        }
        if r == 0 {
            return Err(Error::invalid_argument("scrypt r must be greater than 0"));
        }
        if p == 0 {
            return Err(Error::invalid_argument("scrypt p must be greater than 0"));
        }
        if derived_key_length == 0 {
            return Err(Error::invalid_argument(
                "scrypt derived key length must be greater than 0",
            ));
        }
        Ok(Self {
            n,
            r,
            p,
            derived_key_length,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.n != 0
            && self.n.is_power_of_two()
            && self.r != 0
            && self.p != 0
            && self.derived_key_length != 0
    }

    /// log2(N).
    pub fn log_n(&self) -> u32 {
        self.n.trailing_zeros()
    }

    /// Approximate working memory of one derivation in bytes (128 * r * N).
    pub fn memory_usage(&self) -> u64 {
        128u64
            .saturating_mul(u64::from(self.r))
            .saturating_mul(u64::from(self.n))
    }

    /// Scrypt of `password` and `salt`, `derived_key_length` bytes long.
    pub fn derive_key(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        self.ensure_valid()?;
        let mut derived = Zeroizing::new(vec![0u8; self.derived_key_length as usize]);
        password.derive_scrypt_key_into(salt, self.to_scrypt_params(), derived.as_mut_slice())?;
        Ok(derived)
    }

    pub(crate) fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!("invalid scrypt parameters: {self}")))
        }
    }

    pub(crate) fn to_scrypt_params(self) -> ScryptParams {
        ScryptParams {
            n: self.n as u64,
            r: self.r,
            p: self.p,
        }
    }
}

/// Validity predicate for parameters that did not come through
/// [`ScryptParameters::new`], e.g. those parsed from a wallet file.
pub fn scrypt_params_is_valid(params: &ScryptParameters) -> bool {
    params.is_valid()
}

impl Default for ScryptParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScryptParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScryptParameters(N={}, r={}, p={}, dklen={})",
            self.n, self.r, self.p, self.derived_key_length
        )
    }
}

impl TryFrom<ScryptSettings> for ScryptParameters {
    type Error = Error;

    fn try_from(settings: ScryptSettings) -> Result<Self> {
        Self::new(settings.n, settings.r, settings.p, settings.dklen)
    }
}

impl TryFrom<&ScryptSettings> for ScryptParameters {
    type Error = Error;

    fn try_from(settings: &ScryptSettings) -> Result<Self> {
        Self::try_from(*settings)
    }
}
