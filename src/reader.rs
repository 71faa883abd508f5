//! The decode cursor.

use crate::archive::{Archivable, RawArchivable};
use crate::buffer::ByteSource;
use crate::endian::{Endianness, FixedWidth};
use crate::error::{Error, Result};
use crate::leb128::{self, SignedLeb, UnsignedLeb};

/// A decode cursor over a slice of bytes.
pub type SliceReader<'a, C = ()> = ArchiveReader<std::iter::Copied<std::slice::Iter<'a, u8>>, C>;

/// Decodes values from a forward-only byte source.
///
/// The cursor owns the iteration position and the context value shared by
/// every nested decode in one operation tree. The position only advances;
/// after a reported failure the position is unspecified and the cursor must
/// not be reused expecting consistent state.
pub struct ArchiveReader<S: ByteSource, C = ()> {
    source: S,
    context: C,
}

impl<S: ByteSource> ArchiveReader<S, ()> {
    /// Creates a reader over a byte source with the unit context.
    pub fn new(source: impl IntoIterator<Item = u8, IntoIter = S>) -> Self {
        Self::with_context(source, ())
    }
}

impl<'a> ArchiveReader<std::iter::Copied<std::slice::Iter<'a, u8>>, ()> {
    /// Creates a reader over a byte slice with the unit context.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self::new(bytes.iter().copied())
    }
}

impl<'a, C> ArchiveReader<std::iter::Copied<std::slice::Iter<'a, u8>>, C> {
    /// Creates a reader over a byte slice carrying `context`.
    pub fn from_slice_with_context(bytes: &'a [u8], context: C) -> Self {
        Self::with_context(bytes.iter().copied(), context)
    }
}

impl<S: ByteSource, C> ArchiveReader<S, C> {
    /// Creates a reader over a byte source carrying `context`.
    ///
    /// The context is threaded by reference through every nested decode and
    /// can be retrieved afterward with [`into_context`](Self::into_context).
    pub fn with_context(source: impl IntoIterator<Item = u8, IntoIter = S>, context: C) -> Self {
        Self {
            source: source.into_iter(),
            context,
        }
    }

    /// Returns a shared reference to the context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns a mutable reference to the context.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Consumes the reader and returns the context.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Reads a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.source.next().ok_or(Error::EmptyInput)
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        // `len` may be an untrusted length prefix; cap the preallocation.
        let mut bytes = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            bytes.push(self.read_byte()?);
        }
        Ok(bytes)
    }

    /// Reads a fixed-width numeric value in the given byte order.
    pub fn read_fixed<T: FixedWidth>(&mut self, order: Endianness) -> Result<T> {
        // Scratch sized for the widest supported numeric.
        let mut scratch = [0u8; 16];
        let scratch = &mut scratch[..T::WIDTH];
        for slot in scratch.iter_mut() {
            *slot = self.read_byte()?;
        }
        Ok(T::get_bytes(order, scratch))
    }

    /// Reads an unsigned LEB128 varint.
    pub fn read_unsigned_leb128<T: UnsignedLeb>(&mut self) -> Result<T> {
        leb128::decode_unsigned(&mut self.source)
    }

    /// Reads a signed LEB128 varint.
    pub fn read_signed_leb128<T: SignedLeb>(&mut self) -> Result<T> {
        leb128::decode_signed(&mut self.source)
    }

    /// Reads any archivable value, threading the context through its
    /// nested decodes.
    pub fn read<T: Archivable<C>>(&mut self) -> Result<T> {
        T::from_archive(self)
    }

    /// Reads a raw-representable value through its raw encoding.
    ///
    /// A raw value with no corresponding case is [`Error::InvalidInput`].
    pub fn read_raw<T: RawArchivable>(&mut self) -> Result<T>
    where
        T::Raw: Archivable<C>,
    {
        let raw = self.read::<T::Raw>()?;
        T::from_raw(raw).ok_or(Error::InvalidInput(
            "raw value does not correspond to any case",
        ))
    }
}
