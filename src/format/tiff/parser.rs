//! TIFF header and directory parsing.
//!
//! An Exif block is a small classic TIFF file embedded in the APP1 segment.
//! All offsets inside it are relative to the start of its header, called
//! the base here.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to the 0th IFD, relative to byte 0
//! ```
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:   Entry count N
//! Bytes 2..:   N entries of 12 bytes each
//!              (2 tag, 2 type, 4 count, 4 value-or-offset)
//! Next 4:      Offset to the next IFD, 0 if none
//! ```

use serde::Serialize;

use crate::error::ExifError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, slice_at};

use super::tags::{ExifTag, FieldType};
use super::values::{decode_value, resolve_value, TagValue};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF magic number
const TIFF_MAGIC: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count at the start of an IFD
const IFD_COUNT_SIZE: usize = 2;

/// Size of the next-IFD pointer after the last entry
const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an Exif block.
///
/// Declared once by the TIFF header and used for every multi-byte field in
/// that block, including maker-note directories nested inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Parse the two-byte order marker at the start of a TIFF header.
    pub fn from_marker(bytes: [u8; 2]) -> Result<Self, ExifError> {
        // Read as big-endian because we're checking for specific byte patterns
        let marker = u16::from_be_bytes(bytes);
        match marker {
            BYTE_ORDER_LITTLE_ENDIAN => Ok(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Ok(ByteOrder::BigEndian),
            _ => Err(ExifError::InvalidByteOrder(marker)),
        }
    }

    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Bounds-checked u16 read at `offset` in `buf`.
    #[inline]
    pub fn u16_at(self, buf: &[u8], offset: usize) -> Result<u16, ExifError> {
        slice_at(buf, offset, 2).map(|b| self.read_u16(b))
    }

    /// Bounds-checked u32 read at `offset` in `buf`.
    #[inline]
    pub fn u32_at(self, buf: &[u8], offset: usize) -> Result<u32, ExifError> {
        slice_at(buf, offset, 4).map(|b| self.read_u32(b))
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed header of the TIFF block inside an Exif segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Offset of the header in the file buffer; every IFD offset is relative to it
    pub base: usize,

    /// Offset of the 0th IFD, relative to `base`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header located at `base` in `buf`.
    ///
    /// # Errors
    /// - `OutOfBounds` if fewer than 8 bytes remain at `base`
    /// - `InvalidByteOrder` if the order marker is neither II nor MM
    /// - `InvalidMagic` if the magic number is not 42
    pub fn parse(buf: &[u8], base: usize) -> Result<Self, ExifError> {
        let bytes = slice_at(buf, base, TIFF_HEADER_SIZE)?;

        let byte_order = ByteOrder::from_marker([bytes[0], bytes[1]])?;

        let magic = byte_order.read_u16(&bytes[2..4]);
        if magic != TIFF_MAGIC {
            return Err(ExifError::InvalidMagic(magic));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);

        Ok(TiffHeader {
            byte_order,
            base,
            first_ifd_offset,
        })
    }

    /// Absolute buffer offset of a base-relative offset.
    #[inline]
    pub fn absolute(&self, relative: u32) -> Result<usize, ExifError> {
        self.base
            .checked_add(relative as usize)
            .ok_or(ExifError::OutOfBounds {
                offset: self.base,
                len: relative as usize,
                size: usize::MAX,
            })
    }
}

// =============================================================================
// IFD entries
// =============================================================================

/// The fixed 12-byte part of an IFD entry, before its value is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
    /// Tag ID
    pub tag: u16,

    /// Raw type code as stored in the file
    pub type_code: u16,

    /// Field type decoded from `type_code`
    pub field_type: FieldType,

    /// Number of elements
    pub count: u32,

    /// Buffer offset of the entry's 4-byte value/offset slot
    pub slot_offset: usize,
}

impl EntryHeader {
    /// Parse the entry starting at `offset` in `buf`.
    pub fn parse(buf: &[u8], offset: usize, byte_order: ByteOrder) -> Result<Self, ExifError> {
        let raw = slice_at(buf, offset, IFD_ENTRY_SIZE)?;
        let type_code = byte_order.read_u16(&raw[2..4]);

        Ok(EntryHeader {
            tag: byte_order.read_u16(&raw[0..2]),
            type_code,
            field_type: FieldType::from_u16(type_code),
            count: byte_order.read_u32(&raw[4..8]),
            slot_offset: offset + 8,
        })
    }
}

/// A decoded IFD entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IfdEntry {
    /// Tag ID, or `None` when the entry's type code was not understood.
    ///
    /// Unrecognised entries never match a tag lookup.
    pub tag: Option<u16>,

    /// Field type of the value
    pub field_type: FieldType,

    /// Decoded value
    pub value: TagValue,
}

impl IfdEntry {
    /// Sentinel recorded for an entry with an unsupported type code.
    pub const fn unrecognized() -> Self {
        IfdEntry {
            tag: None,
            field_type: FieldType::Unknown,
            value: TagValue::Empty,
        }
    }

    /// Check whether this entry carries the given tag.
    #[inline]
    pub fn is(&self, tag: u16) -> bool {
        self.tag == Some(tag)
    }

    /// Name of the tag if it is one the crate knows.
    pub fn tag_name(&self) -> Option<&'static str> {
        self.tag.and_then(ExifTag::from_u16).map(ExifTag::name)
    }
}

/// Find the first entry with the given tag.
///
/// Callers pass concatenated IFD lists, so earlier directories shadow later
/// ones.
pub fn find_entry(entries: &[IfdEntry], tag: u16) -> Option<&IfdEntry> {
    entries.iter().find(|e| e.is(tag))
}

// =============================================================================
// Ifd
// =============================================================================

/// A decoded Image File Directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    /// Entries in file order
    pub entries: Vec<IfdEntry>,

    /// Base-relative offset of the next chained IFD, 0 if none
    pub next_ifd_offset: u32,
}

impl Ifd {
    /// Find the first entry with the given tag in this IFD.
    pub fn find(&self, tag: u16) -> Option<&IfdEntry> {
        find_entry(&self.entries, tag)
    }

    /// Total size of an IFD with `entry_count` entries, including the
    /// count field and the next-IFD pointer.
    #[inline]
    pub const fn calculate_size(entry_count: u16) -> usize {
        IFD_COUNT_SIZE + entry_count as usize * IFD_ENTRY_SIZE + IFD_NEXT_OFFSET_SIZE
    }
}

/// Decode the IFD starting at absolute offset `start`.
///
/// Values stored at an offset are looked up at `base + offset`. The declared
/// entry count is checked against the bytes remaining in the buffer before
/// any entry is read, so a corrupt count cannot drive the loop past the end.
/// A missing or truncated next-IFD pointer reads as 0.
///
/// # Errors
/// - `OutOfBounds` if the count field or any value lies outside `buf`
/// - `EntryCountTooLarge` if the entries cannot fit in the buffer
pub fn decode_ifd(
    buf: &[u8],
    start: usize,
    base: usize,
    byte_order: ByteOrder,
) -> Result<Ifd, ExifError> {
    let count = byte_order.u16_at(buf, start)?;

    let entries_start = start + IFD_COUNT_SIZE;
    let available = (buf.len() - entries_start) / IFD_ENTRY_SIZE;
    if count as usize > available {
        return Err(ExifError::EntryCountTooLarge {
            offset: start,
            count,
            available,
        });
    }

    tracing::trace!(offset = start, count, "decoding IFD");

    let mut entries = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let header = EntryHeader::parse(buf, entries_start + i * IFD_ENTRY_SIZE, byte_order)?;

        if header.field_type == FieldType::Unknown {
            tracing::trace!(
                tag = header.tag,
                type_code = header.type_code,
                "skipping entry with unknown field type"
            );
            entries.push(IfdEntry::unrecognized());
            continue;
        }

        let bytes = resolve_value(buf, &header, base, byte_order)?;
        entries.push(IfdEntry {
            tag: Some(header.tag),
            field_type: header.field_type,
            value: decode_value(bytes, header.field_type, header.count, byte_order),
        });
    }

    let next_pointer = start + Ifd::calculate_size(count) - IFD_NEXT_OFFSET_SIZE;
    let next_ifd_offset = byte_order.u32_at(buf, next_pointer).unwrap_or(0);

    Ok(Ifd {
        entries,
        next_ifd_offset,
    })
}

// =============================================================================
// Tests
// =============================================================================
