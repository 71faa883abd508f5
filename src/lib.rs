//! Binarchive - compact binary serialization with explicit byte order and
//! varint packing.
//!
//! Values encode into a flat, versionless byte stream and decode back out of
//! it. Integers pack as LEB128 varints, fixed-width numerics copy their raw
//! bytes in a selectable byte order, and any type can join in by implementing
//! [`Archivable`]. A caller-supplied context value threads through every
//! nested encode/decode of one operation tree.
//!
//! # Example
//!
//! ```rust
//! use binarchive::{ArchiveReader, ArchiveWriter, Endianness, Result};
//!
//! fn main() -> Result<()> {
//!     // Encoding
//!     let mut writer = ArchiveWriter::new();
//!     writer.write_unsigned_leb128(42u64);
//!     writer.write(&"hello".to_string());
//!     writer.write_fixed(0xff_u16, Endianness::Big);
//!     let data = writer.finalize();
//!
//!     // Decoding
//!     let mut reader = ArchiveReader::from_slice(&data);
//!     assert_eq!(reader.read_unsigned_leb128::<u64>()?, 42);
//!     assert_eq!(reader.read::<String>()?, "hello");
//!     assert_eq!(reader.read_fixed::<u16>(Endianness::Big)?, 0xff);
//!     Ok(())
//! }
//! ```

mod archive;
mod buffer;
mod endian;
mod error;
pub mod leb128;
mod reader;
mod types;
mod writer;

pub use archive::{Archivable, RawArchivable};
pub use buffer::{from_hex, to_hex, write_to_path, ByteSink, ByteSource};
pub use endian::{Endianness, FixedWidth};
pub use error::{Error, Result};
pub use reader::{ArchiveReader, SliceReader};
pub use writer::ArchiveWriter;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Encodes a value into a fresh byte buffer.
pub fn to_bytes<T: Archivable>(value: &T) -> Vec<u8> {
    let mut writer = ArchiveWriter::new();
    writer.write(value);
    writer.finalize()
}

/// Decodes a value from a byte slice.
pub fn from_bytes<T: Archivable>(bytes: &[u8]) -> Result<T> {
    let mut reader = ArchiveReader::from_slice(bytes);
    reader.read()
}

/// Decodes a value from a byte slice, discarding the error kind.
///
/// Thin convenience over [`from_bytes`] for callers that only care whether
/// decoding succeeded.
pub fn from_bytes_opt<T: Archivable>(bytes: &[u8]) -> Option<T> {
    from_bytes(bytes).ok()
}

/// Encodes a value into a fresh byte buffer, threading `context` through
/// every nested encode. Returns the buffer together with the context.
pub fn to_bytes_with_context<C, T: Archivable<C>>(value: &T, context: C) -> (Vec<u8>, C) {
    let mut writer = ArchiveWriter::with_context(context);
    writer.write(value);
    writer.into_parts()
}

/// Decodes a value from a byte slice, threading `context` through every
/// nested decode. Returns the value together with the context.
pub fn from_bytes_with_context<C, T: Archivable<C>>(bytes: &[u8], context: C) -> Result<(T, C)> {
    let mut reader = ArchiveReader::from_slice_with_context(bytes, context);
    let value = reader.read()?;
    Ok((value, reader.into_context()))
}
