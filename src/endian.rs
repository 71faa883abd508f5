//! Byte-order policy and the fixed-width numeric codec.
//!
//! Fixed-width values are copied to and from the stream as raw bytes,
//! reordered per a runtime-selected [`Endianness`]. Decoding performs no
//! validation beyond length: any byte pattern is a valid raw numeric
//! representation, including IEEE-754 bit patterns for floats.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// The byte order used when serializing fixed-width numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// The native byte order of the host.
    pub const fn native() -> Self {
        #[cfg(target_endian = "little")]
        let order = Self::Little;

        #[cfg(target_endian = "big")]
        let order = Self::Big;

        order
    }
}

impl Default for Endianness {
    /// Little-endian, the wire default for generic conformances.
    fn default() -> Self {
        Self::Little
    }
}

/// A numeric type of known byte size whose raw bytes can be copied to and
/// from a stream in a selectable byte order.
pub trait FixedWidth: Copy {
    /// The encoded size in bytes.
    const WIDTH: usize;

    /// Writes the raw bytes of `self` into `out`, which must be exactly
    /// [`Self::WIDTH`] bytes long.
    fn put_bytes(self, order: Endianness, out: &mut [u8]);

    /// Reconstructs a value from `bytes`, which must be exactly
    /// [`Self::WIDTH`] bytes long.
    fn get_bytes(order: Endianness, bytes: &[u8]) -> Self;
}

impl FixedWidth for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn put_bytes(self, _order: Endianness, out: &mut [u8]) {
        out[0] = self;
    }

    #[inline]
    fn get_bytes(_order: Endianness, bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl FixedWidth for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn put_bytes(self, _order: Endianness, out: &mut [u8]) {
        out[0] = self as u8;
    }

    #[inline]
    fn get_bytes(_order: Endianness, bytes: &[u8]) -> Self {
        bytes[0] as i8
    }
}

macro_rules! impl_fixed_width {
    ($type:ty, $put:ident, $get:ident) => {
        impl FixedWidth for $type {
            const WIDTH: usize = std::mem::size_of::<$type>();

            #[inline]
            fn put_bytes(self, order: Endianness, out: &mut [u8]) {
                match order {
                    Endianness::Little => LittleEndian::$put(out, self),
                    Endianness::Big => BigEndian::$put(out, self),
                }
            }

            #[inline]
            fn get_bytes(order: Endianness, bytes: &[u8]) -> Self {
                match order {
                    Endianness::Little => LittleEndian::$get(bytes),
                    Endianness::Big => BigEndian::$get(bytes),
                }
            }
        }
    };
}

impl_fixed_width!(u16, write_u16, read_u16);
impl_fixed_width!(u32, write_u32, read_u32);
impl_fixed_width!(u64, write_u64, read_u64);
impl_fixed_width!(u128, write_u128, read_u128);
impl_fixed_width!(i16, write_i16, read_i16);
impl_fixed_width!(i32, write_i32, read_i32);
impl_fixed_width!(i64, write_i64, read_i64);
impl_fixed_width!(i128, write_i128, read_i128);
impl_fixed_width!(f32, write_f32, read_f32);
impl_fixed_width!(f64, write_f64, read_f64);
