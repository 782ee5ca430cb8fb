//! TIFF field types and Exif tag IDs.
//!
//! This module defines the vocabulary of the directory decoder:
//! - Field types that determine how a value is encoded and where it lives
//! - Tag IDs for the Exif fields the overlay cares about

use serde::Serialize;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types understood by the directory decoder.
///
/// Each known type has a fixed element width, which together with the
/// entry's count decides whether the value sits inline in the entry's 4-byte
/// slot or somewhere else in the Exif block.
///
/// Codes outside this set (SignedByte, SignedShort, Float, Double, ...) map to
/// `Unknown`; such entries are kept as sentinels instead of failing the IFD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Unsigned 8-bit integer (1 byte)
    Byte,

    /// 8-bit ASCII character, NUL terminated (1 byte)
    Ascii,

    /// Unsigned 16-bit integer (2 bytes)
    Short,

    /// Unsigned 32-bit integer (4 bytes)
    Long,

    /// Two Longs: numerator then denominator (8 bytes)
    Rational,

    /// Opaque byte data, used by maker notes (1 byte)
    Undefined,

    /// Signed 32-bit integer (4 bytes)
    SignedLong,

    /// Two SignedLongs: numerator then denominator (8 bytes)
    SignedRational,

    /// Type code the decoder does not handle
    Unknown,
}

impl FieldType {
    /// Maximum bytes that fit in the value slot of a classic TIFF entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Map a TIFF type code to a field type.
    pub const fn from_u16(value: u16) -> Self {
        match value {
            1 => FieldType::Byte,
            2 => FieldType::Ascii,
            3 => FieldType::Short,
            4 => FieldType::Long,
            5 => FieldType::Rational,
            7 => FieldType::Undefined,
            9 => FieldType::SignedLong,
            10 => FieldType::SignedRational,
            _ => FieldType::Unknown,
        }
    }

    /// Size of a single element of this type in bytes.
    ///
    /// `Unknown` has no defined width and reports 0.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SignedLong => 4,
            FieldType::Rational | FieldType::SignedRational => 8,
            FieldType::Unknown => 0,
        }
    }

    /// Check whether `count` elements of this type are stored inline.
    ///
    /// Byte-wide types are inline up to 4 elements, Short up to 2 and the
    /// Long types up to 1. Rationals are always stored at an offset,
    /// whatever the count.
    #[inline]
    pub const fn fits_inline(self, count: u32) -> bool {
        match self {
            FieldType::Rational | FieldType::SignedRational | FieldType::Unknown => false,
            _ => self.size_in_bytes() * (count as usize) <= Self::INLINE_THRESHOLD,
        }
    }
}

// =============================================================================
// Exif Tags
// =============================================================================

/// Tag IDs read by the Exif assembler, plus a few common ones that only
/// matter for diagnostic dumps.
///
/// Tags not listed here are still decoded and kept; they just have no name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExifTag {
    // -------------------------------------------------------------------------
    // 0th IFD
    // -------------------------------------------------------------------------
    /// Free-form image title
    ImageDescription = 270,

    /// Camera manufacturer
    Make = 271,

    /// Camera model
    Model = 272,

    /// Image orientation (1-8)
    Orientation = 274,

    /// Firmware or editing software
    Software = 305,

    /// File change date and time
    DateTime = 306,

    /// Pointer to the Exif sub-IFD
    ExifIfdPointer = 34665,

    /// Pointer to the GPS sub-IFD (not followed)
    GpsIfdPointer = 34853,

    // -------------------------------------------------------------------------
    // Exif sub-IFD
    // -------------------------------------------------------------------------
    /// Exposure time in seconds (Rational)
    ExposureTime = 33434,

    /// Aperture as an f-number (Rational)
    FNumber = 33437,

    /// ISO speed (Short)
    IsoSpeedRatings = 34855,

    /// Date and time the shutter fired
    DateTimeOriginal = 36867,

    /// Lens focal length in millimetres (Rational)
    FocalLength = 37386,

    /// Manufacturer-proprietary blob (Undefined)
    MakerNote = 37500,

    /// Lens manufacturer
    LensMake = 42035,

    /// Lens model name
    LensModel = 42036,
}

impl ExifTag {
    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up a known tag by ID.
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            270 => Some(ExifTag::ImageDescription),
            271 => Some(ExifTag::Make),
            272 => Some(ExifTag::Model),
            274 => Some(ExifTag::Orientation),
            305 => Some(ExifTag::Software),
            306 => Some(ExifTag::DateTime),
            34665 => Some(ExifTag::ExifIfdPointer),
            34853 => Some(ExifTag::GpsIfdPointer),
            33434 => Some(ExifTag::ExposureTime),
            33437 => Some(ExifTag::FNumber),
            34855 => Some(ExifTag::IsoSpeedRatings),
            36867 => Some(ExifTag::DateTimeOriginal),
            37386 => Some(ExifTag::FocalLength),
            37500 => Some(ExifTag::MakerNote),
            42035 => Some(ExifTag::LensMake),
            42036 => Some(ExifTag::LensModel),
            _ => None,
        }
    }

    /// Human-readable tag name as used in the Exif standard.
    pub const fn name(self) -> &'static str {
        match self {
            ExifTag::ImageDescription => "ImageDescription",
            ExifTag::Make => "Make",
            ExifTag::Model => "Model",
            ExifTag::Orientation => "Orientation",
            ExifTag::Software => "Software",
            ExifTag::DateTime => "DateTime",
            ExifTag::ExifIfdPointer => "ExifIFDPointer",
            ExifTag::GpsIfdPointer => "GPSInfoIFDPointer",
            ExifTag::ExposureTime => "ExposureTime",
            ExifTag::FNumber => "FNumber",
            ExifTag::IsoSpeedRatings => "ISOSpeedRatings",
            ExifTag::DateTimeOriginal => "DateTimeOriginal",
            ExifTag::FocalLength => "FocalLength",
            ExifTag::MakerNote => "MakerNote",
            ExifTag::LensMake => "LensMake",
            ExifTag::LensModel => "LensModel",
        }
    }
}
