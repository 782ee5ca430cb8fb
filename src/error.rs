use thiserror::Error;

/// Reasons an Exif block could not be decoded.
///
/// None of these ever escape [`crate::exif::decode`]; they are logged and the
/// caller receives [`crate::exif::DEFAULT_META_INFO`]. [`crate::exif::try_decode`]
/// exposes them for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// Buffer is too small to hold SOI plus a segment header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: usize, actual: usize },

    /// First two bytes are not the JPEG Start-Of-Image marker
    #[error("Not a JPEG file: expected SOI marker 0xFFD8, got 0x{0:04X}")]
    NotJpeg(u16),

    /// A segment did not start with 0xFF where a marker was expected
    #[error("Invalid marker byte 0x{byte:02X} at offset {offset}")]
    InvalidMarker { offset: usize, byte: u8 },

    /// Segment walk ended without meeting an APP1 segment
    #[error("No APP1 segment found")]
    App1NotFound,

    /// APP1 segment is too short to carry an Exif header and 0th IFD
    #[error("APP1 segment too short: {0} bytes (need at least 14)")]
    SegmentTooShort(u16),

    /// APP1 segment does not begin with "Exif\0\0"
    #[error("APP1 segment does not carry an Exif identifier code")]
    MissingExifCode,

    /// Byte order marker is neither II nor MM
    #[error("Invalid byte order marker: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// TIFF magic number is not 42
    #[error("Invalid TIFF magic: expected 42, got {0}")]
    InvalidMagic(u16),

    /// A read reached past the end of the buffer
    #[error("Read out of bounds: {len} bytes at offset {offset}, buffer size is {size}")]
    OutOfBounds { offset: usize, len: usize, size: usize },

    /// An IFD declares more entries than the buffer can hold
    #[error("IFD at offset {offset} declares {count} entries but only {available} fit")]
    EntryCountTooLarge {
        offset: usize,
        count: u16,
        available: usize,
    },
}
