//! Built-in `Archivable` conformances and their wire encodings.
//!
//! | Type | Encoding |
//! |---|---|
//! | `bool` | 1 byte: 0x00 = false, 0x01 = true; anything else is invalid |
//! | integers | LEB128 (signed types use the signed variant) |
//! | `f32` / `f64` | raw IEEE-754 bytes, little-endian |
//! | `String` | unsigned varint byte-length, then UTF-8 bytes |
//! | `Option<T>` | 1-byte presence flag, then payload iff present |
//! | `Vec<T>`, sets | unsigned varint element count, then elements in order |
//! | maps | unsigned varint entry count, then key/value pairs |

use crate::archive::Archivable;
use crate::buffer::{ByteSink, ByteSource};
use crate::endian::Endianness;
use crate::error::{Error, Result};
use crate::reader::ArchiveReader;
use crate::writer::ArchiveWriter;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Reads an unsigned varint length prefix.
fn read_len<S: ByteSource, C>(reader: &mut ArchiveReader<S, C>) -> Result<usize> {
    let len: u64 = reader.read_unsigned_leb128()?;
    usize::try_from(len).map_err(|_| Error::InvalidInput("length prefix exceeds the address space"))
}

impl<C> Archivable<C> for bool {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        match reader.read_byte()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            _ => Err(Error::InvalidInput("boolean byte must be 0 or 1")),
        }
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_byte(*self as u8);
    }
}

macro_rules! impl_archivable_unsigned {
    ($($type:ty),*) => {$(
        impl<C> Archivable<C> for $type {
            fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
                reader.read_unsigned_leb128()
            }

            fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
                writer.write_unsigned_leb128(*self);
            }
        }
    )*};
}

macro_rules! impl_archivable_signed {
    ($($type:ty),*) => {$(
        impl<C> Archivable<C> for $type {
            fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
                reader.read_signed_leb128()
            }

            fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
                writer.write_signed_leb128(*self);
            }
        }
    )*};
}

impl_archivable_unsigned!(u8, u16, u32, u64, u128);
impl_archivable_signed!(i8, i16, i32, i64, i128);

macro_rules! impl_archivable_float {
    ($($type:ty),*) => {$(
        impl<C> Archivable<C> for $type {
            fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
                reader.read_fixed(Endianness::Little)
            }

            fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
                writer.write_fixed(*self, Endianness::Little);
            }
        }
    )*};
}

impl_archivable_float!(f32, f64);

impl<C> Archivable<C> for String {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        let len = read_len(reader)?;
        let bytes = reader.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidInput("string bytes are not valid UTF-8"))
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_unsigned_leb128(self.len() as u64);
        writer.write_bytes(self.as_bytes());
    }
}

impl<C, T: Archivable<C>> Archivable<C> for Option<T> {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        if reader.read::<bool>()? {
            Ok(Some(reader.read()?))
        } else {
            Ok(None)
        }
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        match self {
            Some(value) => {
                writer.write(&true);
                writer.write(value);
            }
            None => writer.write(&false),
        }
    }
}

impl<C, T: Archivable<C>> Archivable<C> for Vec<T> {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        let len = read_len(reader)?;
        let mut items = Vec::new();
        for _ in 0..len {
            items.push(reader.read()?);
        }
        Ok(items)
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_unsigned_leb128(self.len() as u64);
        for item in self {
            writer.write(item);
        }
    }
}

impl<C, T: Archivable<C> + Eq + Hash> Archivable<C> for HashSet<T> {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        let len = read_len(reader)?;
        let mut items = HashSet::new();
        for _ in 0..len {
            items.insert(reader.read()?);
        }
        Ok(items)
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_unsigned_leb128(self.len() as u64);
        for item in self {
            writer.write(item);
        }
    }
}

impl<C, T: Archivable<C> + Ord> Archivable<C> for BTreeSet<T> {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        let len = read_len(reader)?;
        let mut items = BTreeSet::new();
        for _ in 0..len {
            items.insert(reader.read()?);
        }
        Ok(items)
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_unsigned_leb128(self.len() as u64);
        for item in self {
            writer.write(item);
        }
    }
}

impl<C, K: Archivable<C> + Eq + Hash, V: Archivable<C>> Archivable<C> for HashMap<K, V> {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        let len = read_len(reader)?;
        let mut entries = HashMap::new();
        for _ in 0..len {
            let key = reader.read()?;
            let value = reader.read()?;
            entries.insert(key, value);
        }
        Ok(entries)
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_unsigned_leb128(self.len() as u64);
        for (key, value) in self {
            writer.write(key);
            writer.write(value);
        }
    }
}

impl<C, K: Archivable<C> + Ord, V: Archivable<C>> Archivable<C> for BTreeMap<K, V> {
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self> {
        let len = read_len(reader)?;
        let mut entries = BTreeMap::new();
        for _ in 0..len {
            let key = reader.read()?;
            let value = reader.read()?;
            entries.insert(key, value);
        }
        Ok(entries)
    }

    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>) {
        writer.write_unsigned_leb128(self.len() as u64);
        for (key, value) in self {
            writer.write(key);
            writer.write(value);
        }
    }
}
