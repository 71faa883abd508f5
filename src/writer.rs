//! The encode sink.

use crate::archive::{Archivable, RawArchivable};
use crate::buffer::ByteSink;
use crate::endian::{Endianness, FixedWidth};
use crate::leb128::{self, SignedLeb, UnsignedLeb};

const INITIAL_CAPACITY: usize = 256;

/// Encodes values into an append-only byte destination.
///
/// The sink owns the destination and the context value shared by every
/// nested encode in one operation tree. Writes are infallible: a well-formed
/// in-memory value always encodes. [`finalize`](Self::finalize) consumes the
/// sink exactly once and releases the completed destination.
pub struct ArchiveWriter<D: ByteSink = Vec<u8>, C = ()> {
    dest: D,
    context: C,
}

impl ArchiveWriter<Vec<u8>, ()> {
    /// Creates a writer over a fresh in-memory buffer with the unit context.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a writer over a fresh in-memory buffer with the specified
    /// capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::wrap(Vec::with_capacity(capacity))
    }
}

impl<C> ArchiveWriter<Vec<u8>, C> {
    /// Creates a writer over a fresh in-memory buffer carrying `context`.
    pub fn with_context(context: C) -> Self {
        Self::wrap_with_context(Vec::with_capacity(INITIAL_CAPACITY), context)
    }
}

impl<D: ByteSink> ArchiveWriter<D, ()> {
    /// Creates a writer over an existing destination with the unit context.
    pub fn wrap(dest: D) -> Self {
        Self::wrap_with_context(dest, ())
    }
}

impl<D: ByteSink, C> ArchiveWriter<D, C> {
    /// Creates a writer over an existing destination carrying `context`.
    pub fn wrap_with_context(dest: D, context: C) -> Self {
        Self { dest, context }
    }

    /// Returns a shared reference to the context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns a mutable reference to the context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Writes a single byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.dest.put(byte);
    }

    /// Writes raw bytes in order.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.dest.put(byte);
        }
    }

    /// Writes a fixed-width numeric value in the given byte order.
    pub fn write_fixed<T: FixedWidth>(&mut self, value: T, order: Endianness) {
        let mut scratch = [0u8; 16];
        let scratch = &mut scratch[..T::WIDTH];
        value.put_bytes(order, scratch);
        self.write_bytes(scratch);
    }

    /// Writes an unsigned LEB128 varint.
    pub fn write_unsigned_leb128<T: UnsignedLeb>(&mut self, value: T) {
        leb128::encode_unsigned(value, &mut self.dest);
    }

    /// Writes a signed LEB128 varint.
    pub fn write_signed_leb128<T: SignedLeb>(&mut self, value: T) {
        leb128::encode_signed(value, &mut self.dest);
    }

    /// Writes any archivable value, threading the context through its
    /// nested encodes.
    pub fn write<T: Archivable<C>>(&mut self, value: &T) {
        value.to_archive(self);
    }

    /// Writes a raw-representable value through its raw encoding.
    pub fn write_raw<T: RawArchivable>(&mut self, value: &T)
    where
        T::Raw: Archivable<C>,
    {
        self.write(&value.raw_value());
    }

    /// Consumes the writer and releases the completed destination.
    pub fn finalize(self) -> D {
        self.dest
    }

    /// Consumes the writer and releases the destination together with the
    /// context.
    pub fn into_parts(self) -> (D, C) {
        (self.dest, self.context)
    }
}

impl Default for ArchiveWriter<Vec<u8>, ()> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_byte() {
        let mut writer = ArchiveWriter::new();
        writer.write_byte(0xab);
        writer.write_byte(0xcd);
        assert_eq!(writer.finalize(), vec![0xab, 0xcd]);
    }

    #[test]
    fn test_write_fixed_both_orders() {
        let mut writer = ArchiveWriter::new();
        writer.write_fixed(0xff_u16, Endianness::Little);
        writer.write_fixed(0xff_u16, Endianness::Big);
        assert_eq!(writer.finalize(), vec![0xff, 0x00, 0x00, 0xff]);
    }

    #[test]
    fn test_write_varints() {
        let mut writer = ArchiveWriter::new();
        writer.write_unsigned_leb128(300u32);
        writer.write_signed_leb128(-2i32);
        assert_eq!(writer.finalize(), vec![0xac, 0x02, 0x7e]);
    }

    #[test]
    fn test_wrap_appends_to_existing() {
        let mut writer = ArchiveWriter::wrap(vec![0x00]);
        writer.write_byte(0x01);
        assert_eq!(writer.finalize(), vec![0x00, 0x01]);
    }

    #[test]
    fn test_into_parts_returns_context() {
        let mut writer = ArchiveWriter::with_context(41u32);
        *writer.context_mut() += 1;
        writer.write_byte(0x00);
        let (dest, context) = writer.into_parts();
        assert_eq!(dest, vec![0x00]);
        assert_eq!(context, 42);
    }
}
