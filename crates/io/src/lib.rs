//! Neo.IO
//!
//! Little-endian binary primitives for the Neo wire format: a bounds-checked
//! [`MemoryReader`], an append-only [`BinaryWriter`], the NEO var-int encoding
//! and the [`Serializable`] trait tying them together.

mod binary_writer;
mod error;
mod memory_reader;
mod serializable;

pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use memory_reader::MemoryReader;
pub use serializable::{helper, Serializable, SerializableExt};
