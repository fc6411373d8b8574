//! Scrypt key derivation.

use std::time::Instant;

use tracing::trace;
use zeroize::Zeroizing;

use crate::CryptoError;

/// Upper bound on the working memory a single derivation may request (1 GiB).
///
/// Parameters are read from wallet files, so `n` and `r` are untrusted; the
/// bound is checked before anything is allocated.
pub const MAX_SCRYPT_MEMORY: u64 = 1 << 30;

/// Raw scrypt cost parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScryptParams {
    pub n: u64,
    pub r: u32,
    pub p: u32,
}

impl core::fmt::Display for ScryptParams {
    #[inline]
    fn fmt(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::write!(
            formatter,
            "ScryptParams{{n:{},r:{},p:{}}}",
            self.n,
            self.r,
            self.p
        )
    }
}

impl ScryptParams {
    /// Bytes allocated by one derivation: the `128 * r * n` work area plus
    /// the `128 * r * p` block buffer. Saturates instead of overflowing.
    pub fn memory_required(&self) -> u64 {
        let block = 128u64.saturating_mul(u64::from(self.r));
        block
            .saturating_mul(self.n)
            .saturating_add(block.saturating_mul(u64::from(self.p)))
    }

    fn to_scrypt(self) -> Result<scrypt::Params, CryptoError> {
        if self.n == 0 || !self.n.is_power_of_two() {
            return Err(CryptoError::InvalidScryptParams(self.to_string()));
        }
        let required = self.memory_required();
        if required > MAX_SCRYPT_MEMORY {
            return Err(CryptoError::ScryptMemoryLimit {
                params: self.to_string(),
                required,
                limit: MAX_SCRYPT_MEMORY,
            });
        }
        // The `len` argument only matters for PHC strings; output length comes from the buffer.
        scrypt::Params::new(self.n.ilog2() as u8, self.r, self.p, 32)
            .map_err(|_| CryptoError::InvalidScryptParams(self.to_string()))
    }
}

pub trait DeriveScryptKey {
    /// Fills `output` with scrypt(self, salt).
    fn derive_scrypt_key_into(
        &self,
        salt: &[u8],
        params: ScryptParams,
        output: &mut [u8],
    ) -> Result<(), CryptoError>;

    fn derive_scrypt_key<const N: usize>(
        &self,
        salt: &[u8],
        params: ScryptParams,
    ) -> Result<Zeroizing<[u8; N]>, CryptoError> {
        let mut derived = Zeroizing::new([0u8; N]);
        self.derive_scrypt_key_into(salt, params, derived.as_mut_slice())?;
        Ok(derived)
    }
}

impl<T: AsRef<[u8]> + ?Sized> DeriveScryptKey for T {
    fn derive_scrypt_key_into(
        &self,
        salt: &[u8],
        params: ScryptParams,
        output: &mut [u8],
    ) -> Result<(), CryptoError> {
        let scrypt_params = params.to_scrypt()?;
        let started = Instant::now();
        scrypt::scrypt(self.as_ref(), salt, &scrypt_params, output)
            .map_err(|_| CryptoError::InvalidDerivedLength(output.len()))?;
        trace!(
            n = params.n,
            r = params.r,
            p = params.p,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scrypt key derived"
        );
        Ok(())
    }
}
