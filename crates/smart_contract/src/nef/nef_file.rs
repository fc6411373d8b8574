use std::fs;
use std::path::Path;

use neo_core::{Error, Result, UInt160};
use neo_cryptography::hash;
use neo_io::{
    helper::get_var_size, BinaryWriter, IoError, IoResult, MemoryReader, Serializable,
    SerializableExt,
};
use tracing::{debug, warn};

use super::{
    CallFlags, MethodToken, MAX_SCRIPT_SIZE, NEF_COMPILER_FIELD_SIZE, NEF_MAGIC,
    NEF_MAX_COMPILER_LENGTH, NEF_MAX_METHOD_TOKENS, NEF_MAX_SOURCE_LENGTH,
};

/// A compiled contract in the Neo Executable Format.
///
/// ```text
/// +------------+-----------+------------------------------------------------------------+
/// |   Field    |  Length   |                          Comment                           |
/// +------------+-----------+------------------------------------------------------------+
/// | Magic      | 4 bytes   | Magic header                                               |
/// | Compiler   | 64 bytes  | Compiler name and version, null padded                     |
/// +------------+-----------+------------------------------------------------------------+
/// | Source     | Var bytes | Source code URL, u8 length prefix                          |
/// +------------+-----------+------------------------------------------------------------+
/// | Reserved   | 2 bytes   | Reserved for future extensions. Must be 0.                 |
/// | Tokens     | Var array | Method tokens, u8 count prefix                             |
/// | Reserved   | 1 byte    | Reserved for future extensions. Must be 0.                 |
/// | Script     | Var bytes | Var-int length prefix + script                             |
/// +------------+-----------+------------------------------------------------------------+
/// | Checksum   | 4 bytes   | First four bytes of double SHA256 hash of the header       |
/// +------------+-----------+------------------------------------------------------------+
/// ```
///
/// Decoding does not verify the checksum; call [`NefFile::verify_checksum`]
/// before trusting bytes that came from elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NefFile {
    compiler: String,
    source: String,
    tokens: Vec<MethodToken>,
    script: Vec<u8>,
    checksum: u32,
}

impl NefFile {
    /// Builds a NEF with no method tokens and a freshly computed checksum.
    ///
    /// An empty `source` is treated the same as `None`.
    pub fn create(
        compiler: impl Into<String>,
        source: Option<&str>,
        script: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let mut nef = Self::from_parts(
            compiler.into(),
            source.unwrap_or_default().to_string(),
            Vec::new(),
            script.into(),
            0,
        )?;
        nef.checksum = nef.compute_checksum();
        debug!(
            compiler = %nef.compiler,
            script_len = nef.script.len(),
            "created NEF file"
        );
        Ok(nef)
    }

    /// Assembles a NEF from already-decoded fields, enforcing every bound.
    /// The checksum is stored as given.
    pub(crate) fn from_parts(
        compiler: String,
        source: String,
        tokens: Vec<MethodToken>,
        script: Vec<u8>,
        checksum: u32,
    ) -> Result<Self> {
        if compiler.contains('\0') {
            return Err(Error::invalid_argument("compiler must not contain NUL"));
        }
        if compiler.len() > NEF_MAX_COMPILER_LENGTH {
            return Err(Error::invalid_size(format!(
                "compiler is {} bytes, maximum is {}",
                compiler.len(),
                NEF_MAX_COMPILER_LENGTH
            )));
        }
        if source.len() > NEF_MAX_SOURCE_LENGTH {
            return Err(Error::invalid_size(format!(
                "source is {} bytes, maximum is {}",
                source.len(),
                NEF_MAX_SOURCE_LENGTH
            )));
        }
        if tokens.len() > NEF_MAX_METHOD_TOKENS {
            return Err(Error::invalid_size(format!(
                "{} method tokens, maximum is {}",
                tokens.len(),
                NEF_MAX_METHOD_TOKENS
            )));
        }
        if script.is_empty() {
            return Err(Error::invalid_argument("script cannot be empty"));
        }
        if script.len() > MAX_SCRIPT_SIZE {
            return Err(Error::invalid_size(format!(
                "script is {} bytes, maximum is {}",
                script.len(),
                MAX_SCRIPT_SIZE
            )));
        }
        Ok(Self {
            compiler,
            source,
            tokens,
            script,
            checksum,
        })
    }

    /// Appends a method token and refreshes the checksum.
    ///
    /// Fails with `InvalidSize` when the table is already full or the method
    /// name is too long; `self` is left untouched on failure.
    pub fn add_method_token(
        &mut self,
        contract_hash: UInt160,
        method: &str,
        parameters_count: u16,
        has_return_value: bool,
        call_flags: CallFlags,
    ) -> Result<()> {
        let token = MethodToken::new(
            contract_hash,
            method,
            parameters_count,
            has_return_value,
            call_flags,
        )?;
        self.add_token(token)
    }

    /// Appends an already constructed token and refreshes the checksum.
    pub fn add_token(&mut self, token: MethodToken) -> Result<()> {
        if self.tokens.len() >= NEF_MAX_METHOD_TOKENS {
            return Err(Error::invalid_size(format!(
                "method token table is full ({} entries)",
                NEF_MAX_METHOD_TOKENS
            )));
        }
        self.tokens.push(token);
        self.checksum = self.compute_checksum();
        Ok(())
    }

    pub fn magic(&self) -> u32 {
        NEF_MAGIC
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    /// The source URL, or `None` when it was empty.
    pub fn source(&self) -> Option<&str> {
        if self.source.is_empty() {
            None
        } else {
            Some(&self.source)
        }
    }

    pub fn tokens(&self) -> &[MethodToken] {
        &self.tokens
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    /// Hash256 over every serialized byte before the checksum field,
    /// first four bytes read as little-endian.
    pub fn compute_checksum(&self) -> u32 {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize_without_checksum(&mut writer);
        u32::from_le_bytes(hash::checksum(writer.as_bytes()))
    }

    pub fn verify_checksum(&self) -> bool {
        let expected = self.compute_checksum();
        if expected != self.checksum {
            debug!(
                stored = self.checksum,
                expected, "NEF checksum mismatch"
            );
            return false;
        }
        true
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_array()
    }

    /// Decodes a NEF. Structural violations and trailing bytes are
    /// `InvalidFormat`; the checksum is not checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let nef = Self::from_array(bytes)?;
        debug!(
            compiler = %nef.compiler,
            tokens = nef.tokens.len(),
            script_len = nef.script.len(),
            "parsed NEF file"
        );
        Ok(nef)
    }

    /// Reads and decodes a `.nef` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let nef = Self::from_bytes(&bytes)?;
        if !nef.verify_checksum() {
            warn!(path = %path.display(), "loaded NEF file with bad checksum");
        }
        Ok(nef)
    }

    /// Writes the binary form to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_bytes())?;
        debug!(path = %path.as_ref().display(), "saved NEF file");
        Ok(())
    }

    fn serialize_without_checksum(&self, writer: &mut BinaryWriter) {
        writer.write_u32(NEF_MAGIC);
        writer.write_fixed_string(&self.compiler, NEF_COMPILER_FIELD_SIZE);
        writer.write_u8(self.source.len() as u8);
        writer.write_bytes(self.source.as_bytes());
        writer.write_u16(0);
        writer.write_u8(self.tokens.len() as u8);
        for token in &self.tokens {
            token.serialize(writer);
        }
        writer.write_u8(0);
        writer.write_var_bytes(&self.script);
    }
}

impl Serializable for NefFile {
    fn size(&self) -> usize {
        4 + // magic
        NEF_COMPILER_FIELD_SIZE +
        1 + self.source.len() +
        2 + // reserved
        1 + self.tokens.iter().map(Serializable::size).sum::<usize>() +
        1 + // reserved
        get_var_size(self.script.len() as u64) + self.script.len() +
        4 // checksum
    }

    fn serialize(&self, writer: &mut BinaryWriter) {
        self.serialize_without_checksum(writer);
        writer.write_u32(self.checksum);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        if reader.read_u32()? != NEF_MAGIC {
            return Err(IoError::InvalidValue("NefFile.magic"));
        }

        let compiler = reader.read_fixed_string(NEF_COMPILER_FIELD_SIZE, "NefFile.compiler")?;
        if compiler.len() > NEF_MAX_COMPILER_LENGTH {
            return Err(IoError::LengthOutOfRange {
                len: compiler.len() as u64,
                max: NEF_MAX_COMPILER_LENGTH as u64,
            });
        }

        let source_len = reader.read_u8()? as usize;
        let source = String::from_utf8(reader.read_memory(source_len)?.to_vec())
            .map_err(|_| IoError::InvalidUtf8("NefFile.source"))?;

        if reader.read_u16()? != 0 {
            return Err(IoError::InvalidValue("NefFile.reserved"));
        }

        let token_count = reader.read_u8()? as usize;
        if token_count > NEF_MAX_METHOD_TOKENS {
            return Err(IoError::LengthOutOfRange {
                len: token_count as u64,
                max: NEF_MAX_METHOD_TOKENS as u64,
            });
        }
        let mut tokens = Vec::with_capacity(token_count);
        for _ in 0..token_count {
            tokens.push(MethodToken::deserialize(reader)?);
        }

        if reader.read_u8()? != 0 {
            return Err(IoError::InvalidValue("NefFile.reserved2"));
        }

        let script = reader.read_var_bytes(MAX_SCRIPT_SIZE)?;
        if script.is_empty() {
            return Err(IoError::InvalidValue("NefFile.script"));
        }

        let checksum = reader.read_u32()?;

        Ok(Self {
            compiler,
            source,
            tokens,
            script,
            checksum,
        })
    }
}
