//! Address and verification-script helpers.

use neo_config::{ADDRESS_SIZE, COMPRESSED_PUBLIC_KEY_SIZE};
use neo_core::{Error, Result, UInt160};
use neo_cryptography::base58::{base58_check_decode, base58_check_encode};
use neo_cryptography::hash::hash160;

const PUSHDATA1: u8 = 0x0C;
const SYSCALL: u8 = 0x41;
/// Interop hash of `System.Crypto.CheckSig`.
const CHECK_SIG: [u8; 4] = [0x56, 0xE7, 0xB3, 0x27];

/// Length of a single-signature verification script.
pub const SIGNATURE_REDEEM_SCRIPT_SIZE: usize = 2 + COMPRESSED_PUBLIC_KEY_SIZE + 1 + 4;

/// Builds the standard single-signature verification script:
/// `PUSHDATA1 33 <pubkey> SYSCALL CheckSig`.
pub fn create_signature_redeem_script(
    public_key: &[u8; COMPRESSED_PUBLIC_KEY_SIZE],
) -> [u8; SIGNATURE_REDEEM_SCRIPT_SIZE] {
    let mut script = [0u8; SIGNATURE_REDEEM_SCRIPT_SIZE];
    script[0] = PUSHDATA1;
    script[1] = COMPRESSED_PUBLIC_KEY_SIZE as u8;
    script[2..2 + COMPRESSED_PUBLIC_KEY_SIZE].copy_from_slice(public_key);
    script[2 + COMPRESSED_PUBLIC_KEY_SIZE] = SYSCALL;
    script[3 + COMPRESSED_PUBLIC_KEY_SIZE..].copy_from_slice(&CHECK_SIG);
    script
}

/// Hash160 of a script, as a little-endian `UInt160`.
pub fn script_hash(script: &[u8]) -> UInt160 {
    UInt160::new(hash160(script))
}

/// Converts a script hash to an address.
pub fn to_address(script_hash: &UInt160, version: u8) -> String {
    let mut data = [0u8; 1 + ADDRESS_SIZE];
    data[0] = version;
    data[1..].copy_from_slice(script_hash.as_bytes());
    base58_check_encode(&data)
}

/// Converts an address back to its script hash, checking the version byte.
pub fn to_script_hash(address: &str, version: u8) -> Result<UInt160> {
    let data = base58_check_decode(address)?;
    if data.len() != 1 + ADDRESS_SIZE {
        return Err(Error::invalid_format(format!(
            "address decodes to {} bytes, expected {}",
            data.len(),
            1 + ADDRESS_SIZE
        )));
    }
    if data[0] != version {
        return Err(Error::invalid_format(format!(
            "address version {:#04x} does not match {:#04x}",
            data[0], version
        )));
    }
    UInt160::from_bytes(&data[1..])
}
