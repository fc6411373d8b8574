//! JSON form of a NEF, as printed by compilers and RPC nodes.
//!
//! ```json
//! {
//!   "magic": 860243278,
//!   "compiler": "neon-3.6.0",
//!   "source": "",
//!   "tokens": [],
//!   "script": "QZ4=",
//!   "checksum": 123456789
//! }
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{MethodToken, NefFile, NEF_MAGIC};

#[derive(Serialize)]
struct NefJsonRef<'a> {
    magic: u32,
    compiler: &'a str,
    source: &'a str,
    tokens: &'a [MethodToken],
    script: String,
    checksum: u32,
}

#[derive(Deserialize)]
struct NefJson {
    magic: u32,
    compiler: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    tokens: Vec<MethodToken>,
    script: String,
    checksum: u32,
}

impl Serialize for NefFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NefJsonRef {
            magic: self.magic(),
            compiler: self.compiler(),
            source: self.source().unwrap_or_default(),
            tokens: self.tokens(),
            script: STANDARD.encode(self.script()),
            checksum: self.checksum(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NefFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = NefJson::deserialize(deserializer)?;
        if json.magic != NEF_MAGIC {
            return Err(D::Error::custom(format!(
                "invalid NEF magic {:#010x}",
                json.magic
            )));
        }
        let script = STANDARD
            .decode(json.script.as_bytes())
            .map_err(|e| D::Error::custom(format!("invalid script: {e}")))?;
        NefFile::from_parts(
            json.compiler,
            json.source.unwrap_or_default(),
            json.tokens,
            script,
            json.checksum,
        )
        .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::nef::{CallFlags, NefFile};
    use neo_core::UInt160;
    use serde_json::json;

    #[test]
    fn test_to_json() {
        let nef = NefFile::create("neoc-test", None, vec![0x41, 0x9E]).unwrap();
        let value = serde_json::to_value(&nef).unwrap();
        assert_eq!(value["magic"], json!(0x3346_454E));
        assert_eq!(value["compiler"], json!("neoc-test"));
        assert_eq!(value["source"], json!(""));
        assert_eq!(value["tokens"], json!([]));
        assert_eq!(value["script"], json!("QZ4="));
        assert_eq!(value["checksum"], json!(nef.checksum()));
    }

    #[test]
    fn test_json_round_trip_with_tokens() {
        let mut nef = NefFile::create("neon", Some("https://x.io/c"), vec![0x40]).unwrap();
        nef.add_method_token(UInt160::zero(), "symbol", 0, true, CallFlags::READ_ONLY)
            .unwrap();
        let text = serde_json::to_string(&nef).unwrap();
        let back: NefFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back, nef);
        assert!(back.verify_checksum());
    }

    #[test]
    fn test_json_rejects_bad_magic() {
        let nef = NefFile::create("c", None, vec![0x40]).unwrap();
        let mut value = serde_json::to_value(&nef).unwrap();
        value["magic"] = json!(1);
        assert!(serde_json::from_value::<NefFile>(value).is_err());
    }

    #[test]
    fn test_json_keeps_stored_checksum() {
        let nef = NefFile::create("c", None, vec![0x40]).unwrap();
        let mut value = serde_json::to_value(&nef).unwrap();
        value["checksum"] = json!(nef.checksum().wrapping_add(1));
        let back: NefFile = serde_json::from_value(value).unwrap();
        assert!(!back.verify_checksum());
    }
}
