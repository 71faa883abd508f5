//! The extensibility protocol: any type may plug into encode/decode by
//! supplying a construct-from-cursor and write-to-sink pair.

use crate::buffer::{ByteSink, ByteSource};
use crate::error::Result;
use crate::reader::ArchiveReader;
use crate::writer::ArchiveWriter;

/// A type that participates in archive encode/decode.
///
/// The context type `C` is fixed for a whole operation tree by the cursor or
/// sink; conformances reach the single shared instance through
/// [`ArchiveReader::context_mut`] and [`ArchiveWriter::context_mut`].
/// Composite types delegate to the same cursor/sink for their constituent
/// fields, depth-first in declared order.
///
/// # Example
///
/// ```
/// use binarchive::{Archivable, ArchiveReader, ArchiveWriter, ByteSink, ByteSource, Result};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     label: Option<String>,
/// }
///
/// impl Archivable for Point {
///     fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S>) -> Result<Self> {
///         Ok(Self {
///             x: reader.read()?,
///             y: reader.read()?,
///             label: reader.read()?,
///         })
///     }
///
///     fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D>) {
///         writer.write(&self.x);
///         writer.write(&self.y);
///         writer.write(&self.label);
///     }
/// }
///
/// let point = Point { x: 3, y: -4, label: Some("origin".into()) };
/// let bytes = binarchive::to_bytes(&point);
/// assert_eq!(binarchive::from_bytes::<Point>(&bytes).unwrap(), point);
/// ```
pub trait Archivable<C = ()>: Sized {
    /// Constructs a value by reading from the cursor.
    fn from_archive<S: ByteSource>(reader: &mut ArchiveReader<S, C>) -> Result<Self>;

    /// Writes the value to the sink.
    fn to_archive<D: ByteSink>(&self, writer: &mut ArchiveWriter<D, C>);
}

/// An enum-like type archived through an underlying raw value.
///
/// Encoding writes the raw value with its own [`Archivable`] conformance;
/// decoding reads the raw value and maps it back to a case. A raw value with
/// no corresponding case fails the decode with
/// [`Error::InvalidInput`](crate::Error::InvalidInput).
///
/// # Example
///
/// ```
/// use binarchive::RawArchivable;
///
/// #[derive(Debug, PartialEq)]
/// enum Compression {
///     None,
///     Fast,
///     Best,
/// }
///
/// impl RawArchivable for Compression {
///     type Raw = u8;
///
///     fn raw_value(&self) -> u8 {
///         match self {
///             Self::None => 0,
///             Self::Fast => 1,
///             Self::Best => 2,
///         }
///     }
///
///     fn from_raw(raw: u8) -> Option<Self> {
///         match raw {
///             0 => Some(Self::None),
///             1 => Some(Self::Fast),
///             2 => Some(Self::Best),
///             _ => None,
///         }
///     }
/// }
///
/// let mut writer = binarchive::ArchiveWriter::new();
/// writer.write_raw(&Compression::Fast);
/// let bytes = writer.finalize();
/// let mut reader = binarchive::ArchiveReader::from_slice(&bytes);
/// assert_eq!(reader.read_raw::<Compression>().unwrap(), Compression::Fast);
/// ```
pub trait RawArchivable: Sized {
    /// The underlying raw value type.
    type Raw;

    /// Returns the raw value for this case.
    fn raw_value(&self) -> Self::Raw;

    /// Maps a raw value back to a case, or `None` if no case matches.
    fn from_raw(raw: Self::Raw) -> Option<Self>;
}
