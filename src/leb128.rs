//! Variable-length integer encoding and decoding (LEB128).
//!
//! Each byte carries 7 bits of data; bit 7 is a continuation flag. The
//! signed variant uses an arithmetic shift while encoding and bit 6 of the
//! final group to decide sign extension while decoding.
//!
//! `usize` and `isize` are omitted so the wire format never depends on the
//! target architecture.

use crate::buffer::{ByteSink, ByteSource};
use crate::error::{Error, Result};
use std::ops::{BitOrAssign, Shl, ShrAssign};

const DATA_BITS_MASK: u8 = 0x7f;
const CONTINUATION_BIT: u8 = 0x80;
const SIGN_BIT: u8 = 0x40;
const DATA_BITS_PER_GROUP: u32 = 7;

/// An unsigned integer that can be LEB128 encoded.
pub trait UnsignedLeb:
    Copy + Eq + ShrAssign<u32> + Shl<u32, Output = Self> + BitOrAssign
{
    /// The width of the integer in bits.
    const BITS: u32;
    /// The zero value.
    const ZERO: Self;

    /// Zero-extends a 7-bit group into the integer type.
    fn from_group(group: u8) -> Self;

    /// Returns the low 8 bits.
    fn as_u8(self) -> u8;
}

macro_rules! impl_unsigned_leb {
    ($type:ty) => {
        impl UnsignedLeb for $type {
            const BITS: u32 = <$type>::BITS;
            const ZERO: Self = 0;

            #[inline]
            fn from_group(group: u8) -> Self {
                group as $type
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}

impl_unsigned_leb!(u8);
impl_unsigned_leb!(u16);
impl_unsigned_leb!(u32);
impl_unsigned_leb!(u64);
impl_unsigned_leb!(u128);

/// A signed integer that can be LEB128 encoded.
pub trait SignedLeb:
    Copy + Eq + ShrAssign<u32> + Shl<u32, Output = Self> + BitOrAssign
{
    /// The width of the integer in bits.
    const BITS: u32;
    /// The zero value.
    const ZERO: Self;
    /// The all-ones value.
    const MINUS_ONE: Self;

    /// Zero-extends a 7-bit group into the integer type.
    fn from_group(group: u8) -> Self;

    /// Returns the low 8 bits.
    fn as_u8(self) -> u8;

    /// Returns true if the value is negative.
    fn is_negative(self) -> bool;
}

macro_rules! impl_signed_leb {
    ($type:ty) => {
        impl SignedLeb for $type {
            const BITS: u32 = <$type>::BITS;
            const ZERO: Self = 0;
            const MINUS_ONE: Self = -1;

            #[inline]
            fn from_group(group: u8) -> Self {
                group as $type
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }

            #[inline]
            fn is_negative(self) -> bool {
                self < 0
            }
        }
    };
}

impl_signed_leb!(i8);
impl_signed_leb!(i16);
impl_signed_leb!(i32);
impl_signed_leb!(i64);
impl_signed_leb!(i128);

/// Encodes an unsigned integer as a LEB128 varint.
pub fn encode_unsigned<T: UnsignedLeb>(mut value: T, sink: &mut impl ByteSink) {
    loop {
        let group = value.as_u8() & DATA_BITS_MASK;
        value >>= DATA_BITS_PER_GROUP;
        if value == T::ZERO {
            sink.put(group);
            return;
        }
        sink.put(group | CONTINUATION_BIT);
    }
}

/// Encodes a signed integer as a LEB128 varint.
///
/// Terminates once the remaining value is pure sign extension and the last
/// group's bit 6 agrees with it; this emits one extra group when a set sign
/// bit would otherwise be misread.
pub fn encode_signed<T: SignedLeb>(mut value: T, sink: &mut impl ByteSink) {
    loop {
        let group = value.as_u8() & DATA_BITS_MASK;
        value >>= DATA_BITS_PER_GROUP; // arithmetic shift
        let done = (value == T::ZERO && group & SIGN_BIT == 0)
            || (value == T::MINUS_ONE && group & SIGN_BIT != 0);
        if done {
            sink.put(group);
            return;
        }
        sink.put(group | CONTINUATION_BIT);
    }
}

/// Decodes an unsigned integer from a LEB128 varint.
///
/// Fails with [`Error::InvalidInput`] if any group carries bits at or beyond
/// bit `T::BITS`, and with [`Error::EmptyInput`] if the source is exhausted
/// mid-sequence.
pub fn decode_unsigned<T: UnsignedLeb, S: ByteSource>(source: &mut S) -> Result<T> {
    let mut result = T::ZERO;
    let mut shift = 0u32;
    loop {
        let byte = source.next().ok_or(Error::EmptyInput)?;
        let group = byte & DATA_BITS_MASK;
        if shift >= T::BITS {
            if group != 0 {
                return Err(Error::InvalidInput("varint overflows the integer width"));
            }
        } else {
            let remaining = T::BITS - shift;
            if remaining < DATA_BITS_PER_GROUP && group >> remaining != 0 {
                return Err(Error::InvalidInput("varint overflows the integer width"));
            }
            result |= T::from_group(group) << shift;
        }
        if byte & CONTINUATION_BIT == 0 {
            return Ok(result);
        }
        shift += DATA_BITS_PER_GROUP;
    }
}

/// Decodes a signed integer from a LEB128 varint.
///
/// Groups that straddle or pass bit `T::BITS - 1` must replicate the decoded
/// sign bit exactly, else [`Error::InvalidInput`]. On the terminating group,
/// a set bit 6 sign-extends any bits not yet accumulated.
pub fn decode_signed<T: SignedLeb, S: ByteSource>(source: &mut S) -> Result<T> {
    let mut result = T::ZERO;
    let mut shift = 0u32;
    loop {
        let byte = source.next().ok_or(Error::EmptyInput)?;
        let group = byte & DATA_BITS_MASK;
        if shift >= T::BITS {
            // Groups entirely past the width are pure sign extension.
            let expected = if result.is_negative() { DATA_BITS_MASK } else { 0 };
            if group != expected {
                return Err(Error::InvalidInput(
                    "varint sign extension conflicts with the decoded sign",
                ));
            }
        } else {
            let remaining = T::BITS - shift;
            if remaining < DATA_BITS_PER_GROUP {
                // The bits shifted past the width must replicate the sign
                // bit landing at bit BITS - 1.
                let sign = (group >> (remaining - 1)) & 1;
                let extension = group >> remaining;
                let expected = if sign == 1 { DATA_BITS_MASK >> remaining } else { 0 };
                if extension != expected {
                    return Err(Error::InvalidInput("varint overflows the integer width"));
                }
            }
            result |= T::from_group(group) << shift;
        }
        if byte & CONTINUATION_BIT == 0 {
            if shift + DATA_BITS_PER_GROUP < T::BITS && byte & SIGN_BIT != 0 {
                result |= T::MINUS_ONE << (shift + DATA_BITS_PER_GROUP);
            }
            return Ok(result);
        }
        shift += DATA_BITS_PER_GROUP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsigned_bytes<T: UnsignedLeb>(value: T) -> Vec<u8> {
        let mut out = Vec::new();
        encode_unsigned(value, &mut out);
        out
    }

    fn signed_bytes<T: SignedLeb>(value: T) -> Vec<u8> {
        let mut out = Vec::new();
        encode_signed(value, &mut out);
        out
    }

    #[test]
    fn test_encode_unsigned() {
        assert_eq!(unsigned_bytes(0u32), [0x00]);
        assert_eq!(unsigned_bytes(1u32), [0x01]);
        assert_eq!(unsigned_bytes(127u32), [0x7f]);
        assert_eq!(unsigned_bytes(128u32), [0x80, 0x01]);
        assert_eq!(unsigned_bytes(300u32), [0xac, 0x02]);
        assert_eq!(unsigned_bytes(u8::MAX), [0xff, 0x01]);
    }

    #[test]
    fn test_encode_signed() {
        assert_eq!(signed_bytes(0i32), [0x00]);
        assert_eq!(signed_bytes(42i32), [0x2a]);
        assert_eq!(signed_bytes(-2i32), [0x7e]);
        assert_eq!(signed_bytes(-1i32), [0x7f]);
        // Bit 6 set in the last data group forces an extra group.
        assert_eq!(signed_bytes(64i8), [0xc0, 0x00]);
        assert_eq!(signed_bytes(-100i8), [0x9c, 0x7f]);
        assert_eq!(signed_bytes(i8::MIN), [0x80, 0x7f]);
    }

    #[test]
    fn test_unsigned_roundtrip() {
        let cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xff,
            0x3fff,
            0x4000,
            0xffff_ffff,
            u64::MAX,
        ];
        for &value in &cases {
            let bytes = unsigned_bytes(value);
            let mut source = bytes.iter().copied();
            let decoded: u64 = decode_unsigned(&mut source).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(source.next(), None);
        }
    }

    #[test]
    fn test_signed_roundtrip() {
        let cases = [
            0i64,
            1,
            -1,
            2,
            -2,
            63,
            64,
            -64,
            -65,
            127,
            -128,
            0x7fff_ffff,
            -0x8000_0000,
            i64::MIN,
            i64::MAX,
        ];
        for &value in &cases {
            let bytes = signed_bytes(value);
            let mut source = bytes.iter().copied();
            let decoded: i64 = decode_signed(&mut source).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(source.next(), None);
        }
    }

    #[test]
    fn test_narrow_widths_roundtrip() {
        for value in [0u8, 1, 127, 128, 255] {
            let bytes = unsigned_bytes(value);
            let decoded: u8 = decode_unsigned(&mut bytes.iter().copied()).unwrap();
            assert_eq!(decoded, value);
        }
        for value in [i8::MIN, -100, -65, -64, -2, -1, 0, 1, 63, 64, i8::MAX] {
            let bytes = signed_bytes(value);
            let decoded: i8 = decode_signed(&mut bytes.iter().copied()).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_decode_empty_mid_sequence() {
        let mut source = [0x80u8].iter().copied();
        assert_eq!(decode_unsigned::<u64, _>(&mut source), Err(Error::EmptyInput));

        let mut source = std::iter::empty();
        assert_eq!(decode_signed::<i32, _>(&mut source), Err(Error::EmptyInput));
    }

    #[test]
    fn test_unsigned_width_boundary() {
        // 128 fits in u8; 256 does not.
        let decoded: u8 = decode_unsigned(&mut [0x80u8, 0x01].iter().copied()).unwrap();
        assert_eq!(decoded, 128);
        assert!(matches!(
            decode_unsigned::<u8, _>(&mut [0x80u8, 0x02].iter().copied()),
            Err(Error::InvalidInput(_))
        ));
        // The 10th group of a u64 varint may only carry one bit.
        let overlong = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02];
        assert!(matches!(
            decode_unsigned::<u64, _>(&mut overlong.iter().copied()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unsigned_trailing_zero_groups_allowed() {
        // Data past the width is invalid only if it carries nonzero bits.
        let decoded: u8 = decode_unsigned(&mut [0x85u8, 0x80, 0x00].iter().copied()).unwrap();
        assert_eq!(decoded, 5);
    }

    #[test]
    fn test_signed_width_boundary() {
        // 0x80 0x01 would put a positive bit into i8's sign position.
        assert!(matches!(
            decode_signed::<i8, _>(&mut [0x80u8, 0x01].iter().copied()),
            Err(Error::InvalidInput(_))
        ));
        // The canonical i8::MIN encoding is fine.
        let decoded: i8 = decode_signed(&mut [0x80u8, 0x7f].iter().copied()).unwrap();
        assert_eq!(decoded, i8::MIN);
    }

    #[test]
    fn test_signed_extension_conflict() {
        // A negative value followed by a zero extension group.
        assert!(matches!(
            decode_signed::<i8, _>(&mut [0x9cu8, 0xff, 0x00].iter().copied()),
            Err(Error::InvalidInput(_))
        ));
        // Consistent extension groups are accepted.
        let decoded: i8 = decode_signed(&mut [0x9cu8, 0xff, 0x7f].iter().copied()).unwrap();
        assert_eq!(decoded, -100);
    }

    #[test]
    fn test_sign_extension_on_short_sequence() {
        // Bit 6 of a lone terminating group extends across the full width.
        let decoded: i64 = decode_signed(&mut [0x7eu8].iter().copied()).unwrap();
        assert_eq!(decoded, -2);
        let decoded: i64 = decode_signed(&mut [0x3fu8].iter().copied()).unwrap();
        assert_eq!(decoded, 63);
    }
}
