//! TIFF directory decoding for Exif blocks.
//!
//! # Key Concepts
//!
//! - **Byte order**: the block declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **Base pointer**: every offset stored in the block is relative to the
//!   start of the TIFF header, not to the start of the file.
//!
//! - **IFD (Image File Directory)**: a count followed by 12-byte entries.
//!   Exif uses the 0th IFD (main image), a chained 1st IFD (thumbnail) and
//!   an Exif sub-IFD reached through tag 0x8769.
//!
//! - **Inline vs offset values**: values that fit in 4 bytes are stored in
//!   the entry itself, larger values at an offset pointed to by the entry.
//!   Rationals are always stored at an offset.

mod parser;
mod tags;
mod values;

pub use parser::{
    decode_ifd, find_entry, ByteOrder, EntryHeader, Ifd, IfdEntry, TiffHeader, IFD_ENTRY_SIZE,
    TIFF_HEADER_SIZE,
};
pub use tags::{ExifTag, FieldType};
pub use values::{decode_value, resolve_value, Fraction, TagValue};
