//! Endian-aware integer reads and bounds-checked slicing over the file buffer.

use crate::error::ExifError;

// =============================================================================
// Bounds-checked slicing
// =============================================================================

/// Borrow `len` bytes of `buf` starting at `offset`.
///
/// This is the single place where untrusted offsets read out of a file meet
/// the buffer, so every caller gets the same overflow-safe check.
///
/// # Errors
/// `OutOfBounds` if `offset + len` overflows or exceeds the buffer length.
#[inline]
pub fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], ExifError> {
    let end = offset.checked_add(len).filter(|&end| end <= buf.len());
    match end {
        Some(end) => Ok(&buf[offset..end]),
        None => Err(ExifError::OutOfBounds {
            offset,
            len,
            size: buf.len(),
        }),
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// Exif blocks can be either little-endian or big-endian, while JPEG segment
// lengths are always big-endian. These helpers read from the front of a
// slice; callers obtain correctly sized slices through `slice_at`.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
