use neo_core::{Error, Result, UInt160};
use neo_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};

use super::{CallFlags, NEF_MAX_METHOD_NAME_LENGTH};

/// A call from the contract to a method of another contract.
///
/// Tokens are referenced by index from `CALLT` instructions, so their order
/// inside a NEF file is significant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMethodToken")]
pub struct MethodToken {
    hash: UInt160,
    method: String,
    #[serde(rename = "paramcount")]
    parameters_count: u16,
    #[serde(rename = "hasreturnvalue")]
    has_return_value: bool,
    #[serde(rename = "callflags")]
    call_flags: CallFlags,
}

impl MethodToken {
    /// Creates a token; fails with `InvalidSize` if `method` exceeds 31 bytes
    /// and with `InvalidArgument` if `call_flags` carries undefined bits.
    pub fn new(
        contract_hash: UInt160,
        method: impl Into<String>,
        parameters_count: u16,
        has_return_value: bool,
        call_flags: CallFlags,
    ) -> Result<Self> {
        let method = method.into();
        validate_method_name(&method)?;
        validate_call_flags(call_flags)?;
        Ok(Self {
            hash: contract_hash,
            method,
            parameters_count,
            has_return_value,
            call_flags,
        })
    }

    pub fn contract_hash(&self) -> &UInt160 {
        &self.hash
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn parameters_count(&self) -> u16 {
        self.parameters_count
    }

    pub fn has_return_value(&self) -> bool {
        self.has_return_value
    }

    pub fn call_flags(&self) -> CallFlags {
        self.call_flags
    }
}

fn validate_method_name(method: &str) -> Result<()> {
    if method.len() > NEF_MAX_METHOD_NAME_LENGTH {
        return Err(Error::invalid_size(format!(
            "method name is {} bytes, maximum is {}",
            method.len(),
            NEF_MAX_METHOD_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_call_flags(call_flags: CallFlags) -> Result<()> {
    let undefined = call_flags.bits() & !CallFlags::all().bits();
    if undefined != 0 {
        return Err(Error::invalid_argument(format!(
            "call flags 0x{:02X} contain undefined bits 0x{:02X}",
            call_flags.bits(),
            undefined
        )));
    }
    Ok(())
}

impl Serializable for MethodToken {
    fn size(&self) -> usize {
        UInt160::LENGTH + // hash
        1 + self.method.len() + // method length byte + method
        2 + // parameters_count
        1 + // has_return_value
        1 // call_flags
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(self.hash.as_bytes());
        writer.write_u8(self.method.len() as u8);
        writer.write_bytes(self.method.as_bytes());
        writer.write_u16(self.parameters_count);
        writer.write_bool(self.has_return_value);
        writer.write_u8(self.call_flags.bits());
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let hash = UInt160::new(reader.read_array::<{ UInt160::LENGTH }>()?);
        let method_len = reader.read_u8()? as usize;
        if method_len > NEF_MAX_METHOD_NAME_LENGTH {
            return Err(IoError::LengthOutOfRange {
                len: method_len as u64,
                max: NEF_MAX_METHOD_NAME_LENGTH as u64,
            });
        }
        let method = String::from_utf8(reader.read_memory(method_len)?.to_vec())
            .map_err(|_| IoError::InvalidUtf8("MethodToken.method"))?;
        let parameters_count = reader.read_u16()?;
        let has_return_value = reader.read_bool()?;
        let call_flags = CallFlags::from_bits(reader.read_u8()?)
            .ok_or(IoError::InvalidValue("MethodToken.callflags"))?;
        Ok(Self {
            hash,
            method,
            parameters_count,
            has_return_value,
            call_flags,
        })
    }
}

#[derive(Deserialize)]
struct RawMethodToken {
    hash: UInt160,
    method: String,
    #[serde(rename = "paramcount")]
    parameters_count: u16,
    #[serde(rename = "hasreturnvalue")]
    has_return_value: bool,
    #[serde(rename = "callflags")]
    call_flags: CallFlags,
}

impl TryFrom<RawMethodToken> for MethodToken {
    type Error = Error;

    fn try_from(raw: RawMethodToken) -> Result<Self> {
        Self::new(
            raw.hash,
            raw.method,
            raw.parameters_count,
            raw.has_return_value,
            raw.call_flags,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::SerializableExt;

    fn sample_hash() -> UInt160 {
        UInt160::parse("0xef4073a0f2b305a38ec4050e4d3d28bc40ea63f5").unwrap()
    }

    #[test]
    fn test_layout() {
        let token = MethodToken::new(sample_hash(), "transfer", 4, true, CallFlags::ALL).unwrap();
        let bytes = token.to_array();
        assert_eq!(bytes.len(), token.size());
        assert_eq!(bytes.len(), 20 + 1 + 8 + 2 + 1 + 1);
        assert_eq!(&bytes[..20], sample_hash().as_bytes());
        assert_eq!(bytes[20], 8);
        assert_eq!(&bytes[21..29], b"transfer");
        assert_eq!(&bytes[29..], &[0x04, 0x00, 0x01, 0x0F]);
        assert_eq!(MethodToken::from_array(&bytes).unwrap(), token);
    }

    #[test]
    fn test_method_name_bound() {
        let name = "m".repeat(31);
        assert!(MethodToken::new(sample_hash(), name, 0, false, CallFlags::NONE).is_ok());

        let name = "m".repeat(32);
        assert!(matches!(
            MethodToken::new(sample_hash(), name, 0, false, CallFlags::NONE),
            Err(Error::InvalidSize(_))
        ));
    }

    #[test]
    fn test_undefined_call_flags_rejected() {
        for bits in [0x10u8, 0x80, 0x1F] {
            assert!(matches!(
                MethodToken::new(
                    sample_hash(),
                    "transfer",
                    0,
                    false,
                    CallFlags::from_bits_retain(bits)
                ),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert!(MethodToken::new(sample_hash(), "transfer", 0, false, CallFlags::ALL).is_ok());
    }

    #[test]
    fn test_decode_rejects_long_method() {
        let mut bytes = vec![0u8; 20];
        bytes.push(32);
        bytes.extend_from_slice(&[b'a'; 32]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(
            MethodToken::from_array(&bytes),
            Err(IoError::LengthOutOfRange { len: 32, max: 31 })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_flags() {
        let token = MethodToken::new(sample_hash(), "a", 0, false, CallFlags::NONE).unwrap();
        let mut bytes = token.to_array();
        *bytes.last_mut().unwrap() = 0x80;
        assert_eq!(
            MethodToken::from_array(&bytes),
            Err(IoError::InvalidValue("MethodToken.callflags"))
        );
    }

    #[test]
    fn test_json() {
        let token = MethodToken::new(sample_hash(), "balanceOf", 1, true, CallFlags::READ_ONLY).unwrap();
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "hash": "0xef4073a0f2b305a38ec4050e4d3d28bc40ea63f5",
                "method": "balanceOf",
                "paramcount": 1,
                "hasreturnvalue": true,
                "callflags": "ReadOnly"
            })
        );
        let back: MethodToken = serde_json::from_value(json).unwrap();
        assert_eq!(back, token);

        let too_long = serde_json::json!({
            "hash": "0xef4073a0f2b305a38ec4050e4d3d28bc40ea63f5",
            "method": "x".repeat(40),
            "paramcount": 0,
            "hasreturnvalue": false,
            "callflags": "None"
        });
        assert!(serde_json::from_value::<MethodToken>(too_long).is_err());
    }
}
