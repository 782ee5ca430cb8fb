//! TIFF tag value resolution and decoding.
//!
//! Values can be stored either inline in the IFD entry's 4-byte slot (small
//! values) or somewhere else in the Exif block, in which case the slot holds
//! an offset relative to the start of the TIFF header. [`resolve_value`]
//! is the only place that makes that decision; [`decode_value`] then turns
//! the located bytes into a typed [`TagValue`].

use std::fmt;

use serde::Serialize;

use crate::error::ExifError;
use crate::io::slice_at;

use super::parser::{ByteOrder, EntryHeader};
use super::tags::FieldType;

// =============================================================================
// Fraction
// =============================================================================

/// An exact rational number as stored by TIFF Rational/SignedRational.
///
/// Exposure time and aperture stay in this form until they are formatted so
/// that values such as 1/3 s do not pick up floating point noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    /// The fraction 1/1, used as the default exposure time and f-number.
    pub const ONE: Fraction = Fraction::new(1, 1);

    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// Decoded value of an IFD entry.
///
/// The variant follows the entry's field type: Byte and Undefined give raw
/// bytes, Ascii gives text, Short/Long/SignedLong give integers and the two
/// rational types give fractions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagValue {
    Bytes(Vec<u8>),
    Text(String),
    Integers(Vec<i64>),
    Fractions(Vec<Fraction>),
    Empty,
}

impl TagValue {
    /// Text content of an Ascii value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw bytes of a Byte or Undefined value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TagValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// First element of an integer value.
    pub fn first_integer(&self) -> Option<i64> {
        match self {
            TagValue::Integers(v) => v.first().copied(),
            _ => None,
        }
    }

    /// First element of a rational value.
    pub fn first_fraction(&self) -> Option<Fraction> {
        match self {
            TagValue::Fractions(v) => v.first().copied(),
            _ => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<T: fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }

        match self {
            TagValue::Bytes(b) if b.len() > 16 => {
                write!(f, "<{} bytes>", b.len())
            }
            TagValue::Bytes(b) => {
                let hex: Vec<String> = b.iter().map(|x| format!("{:02X}", x)).collect();
                write!(f, "[{}]", hex.join(" "))
            }
            TagValue::Text(s) => write!(f, "{:?}", s),
            TagValue::Integers(v) => write!(f, "[{}]", join(v)),
            TagValue::Fractions(v) => write!(f, "[{}]", join(v)),
            TagValue::Empty => write!(f, "-"),
        }
    }
}

// =============================================================================
// Value resolution
// =============================================================================

/// Locate the bytes holding an entry's value.
///
/// Inline values are read from the entry's own 4-byte slot; everything else
/// is read at `base + slot`, where `base` is the offset of the TIFF header in
/// `buf`. The returned slice is exactly `count * width` bytes long.
///
/// # Errors
/// `OutOfBounds` if the value (or its offset arithmetic) runs past the
/// buffer.
pub fn resolve_value<'a>(
    buf: &'a [u8],
    header: &EntryHeader,
    base: usize,
    byte_order: ByteOrder,
) -> Result<&'a [u8], ExifError> {
    let width = header.field_type.size_in_bytes();
    let len = (header.count as usize)
        .checked_mul(width)
        .ok_or(ExifError::OutOfBounds {
            offset: header.slot_offset,
            len: usize::MAX,
            size: buf.len(),
        })?;

    if header.field_type.fits_inline(header.count) {
        return slice_at(buf, header.slot_offset, len);
    }

    let slot = byte_order.u32_at(buf, header.slot_offset)? as usize;
    let offset = base.checked_add(slot).ok_or(ExifError::OutOfBounds {
        offset: base,
        len,
        size: buf.len(),
    })?;
    slice_at(buf, offset, len)
}

/// Decode located value bytes according to the entry's field type.
///
/// `bytes` must come from [`resolve_value`] for the same type and count, so
/// every element read below is in bounds.
pub fn decode_value(
    bytes: &[u8],
    field_type: FieldType,
    count: u32,
    byte_order: ByteOrder,
) -> TagValue {
    let count = count as usize;
    match field_type {
        FieldType::Byte | FieldType::Undefined => TagValue::Bytes(bytes.to_vec()),
        FieldType::Ascii => {
            let text = String::from_utf8_lossy(bytes);
            TagValue::Text(text.trim_end_matches('\0').to_string())
        }
        FieldType::Short => TagValue::Integers(
            bytes
                .chunks_exact(2)
                .take(count)
                .map(|c| byte_order.read_u16(c) as i64)
                .collect(),
        ),
        FieldType::Long => TagValue::Integers(
            bytes
                .chunks_exact(4)
                .take(count)
                .map(|c| byte_order.read_u32(c) as i64)
                .collect(),
        ),
        FieldType::SignedLong => TagValue::Integers(
            bytes
                .chunks_exact(4)
                .take(count)
                .map(|c| byte_order.read_u32(c) as i32 as i64)
                .collect(),
        ),
        FieldType::Rational => TagValue::Fractions(
            bytes
                .chunks_exact(8)
                .take(count)
                .map(|c| {
                    Fraction::new(
                        byte_order.read_u32(&c[0..4]) as i64,
                        byte_order.read_u32(&c[4..8]) as i64,
                    )
                })
                .collect(),
        ),
        FieldType::SignedRational => TagValue::Fractions(
            bytes
                .chunks_exact(8)
                .take(count)
                .map(|c| {
                    Fraction::new(
                        byte_order.read_u32(&c[0..4]) as i32 as i64,
                        byte_order.read_u32(&c[4..8]) as i32 as i64,
                    )
                })
                .collect(),
        ),
        FieldType::Unknown => TagValue::Empty,
    }
}

// =============================================================================
// Tests
// =============================================================================
