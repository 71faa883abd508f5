//! Byte source and destination capabilities, plus conveniences for the
//! default in-memory container.
//!
//! The core only asks two things of the outside world: a finite, forward-only
//! enumeration of bytes to decode from, and a target that accepts one
//! appended byte at a time to encode into. `Vec<u8>` satisfies both and is
//! the default destination; any `Iterator<Item = u8>` is a valid source.

use std::fs;
use std::io;
use std::path::Path;

/// A finite, forward-only sequence of bytes to decode from.
///
/// Blanket-implemented for every byte iterator; a source is consumed once,
/// left to right, and never rewound.
pub trait ByteSource: Iterator<Item = u8> {}

impl<T: Iterator<Item = u8>> ByteSource for T {}

/// An append-only byte destination to encode into.
///
/// No random access, no overwrite: every byte lands after the previous one.
pub trait ByteSink {
    /// Appends a single byte.
    fn put(&mut self, byte: u8);
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn put(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Renders a byte buffer as lowercase hexadecimal text.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parses hexadecimal text into a byte buffer.
///
/// Returns `None` on odd length or non-hex characters.
pub fn from_hex(text: &str) -> Option<Vec<u8>> {
    hex::decode(text).ok()
}

/// Writes a byte buffer to a file, replacing any existing contents.
pub fn write_to_path(bytes: &[u8], path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, bytes)
}
