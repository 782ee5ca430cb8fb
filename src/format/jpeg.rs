//! JPEG segment scanning.
//!
//! A JPEG file is a sequence of marker segments. Every segment starts with
//! `0xFF` followed by a marker code; most markers are followed by a
//! big-endian 16-bit length that counts itself but not the marker.
//!
//! ```text
//! FF D8                      SOI (no length)
//! FF E0 <len> <payload>      APP0 (JFIF), optional
//! FF E1 <len> Exif\0\0 ...   APP1 carrying the TIFF-structured Exif block
//! ...
//! FF DA <len> <scan data>    SOS, entropy-coded data follows
//! ```
//!
//! The scanner only needs to walk far enough to find APP1. It stops at SOS
//! or EOI because nothing after the first scan carries Exif.

use crate::error::ExifError;
use crate::io::{read_u16_be, slice_at};

// =============================================================================
// JPEG Markers
// =============================================================================

/// First byte of every marker
pub const MARKER_PREFIX: u8 = 0xFF;

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker code
pub const EOI: u8 = 0xD9;

/// Start Of Scan marker code
pub const SOS: u8 = 0xDA;

/// Application segment 1 (Exif) marker code
pub const APP1: u8 = 0xE1;

/// Temporary private-use marker, has no length field
const TEM: u8 = 0x01;

/// Restart markers RST0..RST7, no length field
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

/// Smallest APP1 length that can hold a usable Exif block.
///
/// 6 ("Exif\0\0") + 2 (byte order) + 2 (TIFF magic) + 4 (0th IFD pointer)
/// + 2 (0th IFD entry count).
pub const MIN_EXIF_SEGMENT_SIZE: u16 = 14;

// =============================================================================
// Segment
// =============================================================================

/// Location of a marker segment inside the file buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Offset of the segment's `0xFF` marker byte
    pub start: usize,

    /// Value of the segment's length field (includes the 2 length bytes)
    pub size: u16,
}

impl Segment {
    /// Offset of the first payload byte, just past marker and length.
    #[inline]
    pub const fn payload_start(&self) -> usize {
        self.start + 4
    }
}

// =============================================================================
// Segment Scanner
// =============================================================================

/// Check whether a buffer starts with the JPEG SOI marker.
pub fn is_jpeg(buf: &[u8]) -> bool {
    buf.len() >= 2 && buf[0..2] == SOI
}

/// Locate the first APP1 segment of a JPEG file.
///
/// Walks segments from offset 2, skipping each one by its declared length
/// until an APP1 marker is met. Fill bytes (`FF FF`) and length-less markers
/// are stepped over.
///
/// # Errors
/// - `NotJpeg` if the buffer does not start with SOI
/// - `InvalidMarker` if a segment does not start with `0xFF`
/// - `App1NotFound` if SOS, EOI or the end of the buffer comes first
/// - `SegmentTooShort` if the APP1 length cannot hold an Exif header
/// - `OutOfBounds` if a length field is cut off by the end of the buffer
pub fn find_app1(buf: &[u8]) -> Result<Segment, ExifError> {
    if !is_jpeg(buf) {
        let found = slice_at(buf, 0, 2).map(read_u16_be).unwrap_or(0);
        return Err(ExifError::NotJpeg(found));
    }

    let mut pos = 2;
    while pos + 1 < buf.len() {
        let byte = buf[pos];
        if byte != MARKER_PREFIX {
            return Err(ExifError::InvalidMarker { offset: pos, byte });
        }

        let marker = buf[pos + 1];
        match marker {
            MARKER_PREFIX => {
                pos += 1;
            }
            APP1 => {
                let size = read_u16_be(slice_at(buf, pos + 2, 2)?);
                if size < MIN_EXIF_SEGMENT_SIZE {
                    return Err(ExifError::SegmentTooShort(size));
                }
                tracing::trace!(offset = pos, size, "found APP1 segment");
                return Ok(Segment { start: pos, size });
            }
            SOS | EOI => break,
            TEM | RST0..=RST7 => {
                pos += 2;
            }
            _ => {
                let length = read_u16_be(slice_at(buf, pos + 2, 2)?) as usize;
                tracing::trace!(offset = pos, marker, length, "skipping segment");
                pos += 2 + length;
            }
        }
    }

    Err(ExifError::App1NotFound)
}

// =============================================================================
// Tests
// =============================================================================
