//! NEF codec: binary layout, checksum and JSON shape.

mod call_flags;
mod json;
mod method_token;
mod nef_file;

pub use call_flags::CallFlags;
pub use method_token::MethodToken;
pub use nef_file::NefFile;

pub use neo_config::{
    MAX_SCRIPT_SIZE, NEF_COMPILER_FIELD_SIZE, NEF_MAGIC, NEF_MAX_COMPILER_LENGTH,
    NEF_MAX_METHOD_NAME_LENGTH, NEF_MAX_METHOD_TOKENS, NEF_MAX_SOURCE_LENGTH,
};
