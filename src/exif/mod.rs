//! Exif assembly: from raw JPEG bytes to a [`MetaInfo`] record.
//!
//! # Decoding Process
//!
//! 1. Find the APP1 segment ([`crate::format::jpeg::find_app1`])
//! 2. Check the `Exif\0\0` identifier code at the start of its payload
//! 3. Parse the TIFF header right after it; that offset is the base pointer
//! 4. Decode the 0th IFD, the chained 1st IFD and the Exif sub-IFD
//! 5. Project the merged entries onto [`MetaInfo`]
//! 6. Let the manufacturer resolver patch the lens name
//!
//! Every structural problem degrades to [`DEFAULT_META_INFO`]; a missing tag
//! only affects its own field.

mod maker;

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use crate::error::ExifError;
use crate::format::jpeg::find_app1;
use crate::format::tiff::{
    decode_ifd, find_entry, ByteOrder, ExifTag, Fraction, IfdEntry, TiffHeader,
};
use crate::io::slice_at;

pub use maker::{Maker, PANASONIC_LENS_TAG, PANASONIC_NOTE_HEADER_SIZE};

// =============================================================================
// Constants
// =============================================================================

/// Exif identifier code "Exif\0\0" at the start of the APP1 payload
pub const EXIF_ID: [u8; 6] = [0x45, 0x78, 0x69, 0x66, 0x00, 0x00];

/// Inputs shorter than this cannot hold SOI plus any segment header
pub const MIN_FILE_SIZE: usize = 8;

/// Placeholder shown for text fields that could not be read
pub const UNKNOWN_TEXT: &str = "?";

/// ISO value used when the file does not record one
pub const DEFAULT_ISO: u32 = 100;

/// Result of decoding a file with no usable Exif block.
pub const DEFAULT_META_INFO: MetaInfo = MetaInfo {
    camera_maker: Cow::Borrowed(UNKNOWN_TEXT),
    camera_model: Cow::Borrowed(UNKNOWN_TEXT),
    lens_name: Cow::Borrowed(UNKNOWN_TEXT),
    exposure_time: Fraction::ONE,
    f_number: Fraction::ONE,
    iso_speed_ratings: DEFAULT_ISO,
};

// =============================================================================
// MetaInfo
// =============================================================================

/// Camera settings shown in the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaInfo {
    pub camera_maker: Cow<'static, str>,
    pub camera_model: Cow<'static, str>,
    pub lens_name: Cow<'static, str>,
    pub exposure_time: Fraction,
    pub f_number: Fraction,
    pub iso_speed_ratings: u32,
}

impl Default for MetaInfo {
    fn default() -> Self {
        DEFAULT_META_INFO
    }
}

impl MetaInfo {
    /// Project decoded Exif entries onto the overlay fields.
    ///
    /// Missing or mistyped tags fall back to the matching field of
    /// [`DEFAULT_META_INFO`]. The lens name is then handed to the
    /// manufacturer resolver, which may replace it.
    pub fn from_exif(exif: &ExifData<'_>) -> Self {
        let text_or_default = |tag: ExifTag| -> Cow<'static, str> {
            exif.text(tag)
                .map(|s| Cow::Owned(s.to_string()))
                .unwrap_or(Cow::Borrowed(UNKNOWN_TEXT))
        };

        let mut info = MetaInfo {
            camera_maker: text_or_default(ExifTag::Make),
            camera_model: text_or_default(ExifTag::Model),
            lens_name: text_or_default(ExifTag::LensModel),
            exposure_time: exif
                .first_fraction(ExifTag::ExposureTime)
                .unwrap_or(Fraction::ONE),
            f_number: exif.first_fraction(ExifTag::FNumber).unwrap_or(Fraction::ONE),
            iso_speed_ratings: exif
                .first_integer(ExifTag::IsoSpeedRatings)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(DEFAULT_ISO),
        };

        let maker = Maker::from_camera_maker(&info.camera_maker);
        if let Some(lens) = maker.resolve_lens_name(exif) {
            debug!(?maker, lens = %lens, "lens name taken from maker note");
            info.lens_name = Cow::Owned(lens);
        }

        info
    }
}

// =============================================================================
// ExifData
// =============================================================================

/// All entries of an Exif block, merged in lookup order.
///
/// Entries from the 0th IFD come first, then the 1st IFD, then the Exif
/// sub-IFD. Lookups return the first match, so earlier directories shadow
/// later ones. The file buffer is kept because maker-note resolvers need to
/// search it.
#[derive(Debug, Clone)]
pub struct ExifData<'a> {
    buf: &'a [u8],
    header: TiffHeader,
    entries: Vec<IfdEntry>,
}

impl<'a> ExifData<'a> {
    /// The whole file buffer the block was read from.
    #[inline]
    pub fn buffer(&self) -> &'a [u8] {
        self.buf
    }

    /// Offset of the TIFF header in the buffer.
    #[inline]
    pub fn base(&self) -> usize {
        self.header.base
    }

    /// Byte order declared by the TIFF header.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }

    /// Merged entries in lookup order.
    pub fn entries(&self) -> &[IfdEntry] {
        &self.entries
    }

    /// First entry carrying `tag`.
    pub fn find(&self, tag: ExifTag) -> Option<&IfdEntry> {
        find_entry(&self.entries, tag.as_u16())
    }

    /// Text of an Ascii tag.
    pub fn text(&self, tag: ExifTag) -> Option<&str> {
        self.find(tag).and_then(|e| e.value.as_text())
    }

    /// First integer of a Short/Long tag.
    pub fn first_integer(&self, tag: ExifTag) -> Option<i64> {
        self.find(tag).and_then(|e| e.value.first_integer())
    }

    /// First fraction of a Rational tag.
    pub fn first_fraction(&self, tag: ExifTag) -> Option<Fraction> {
        self.find(tag).and_then(|e| e.value.first_fraction())
    }
}

/// Locate and decode the Exif block of a JPEG file.
///
/// # Errors
/// - `FileTooSmall` for inputs under 8 bytes
/// - any segment-scanner error from [`find_app1`]
/// - `MissingExifCode` if APP1 does not start with `Exif\0\0`
/// - `InvalidByteOrder` / `InvalidMagic` for a malformed TIFF header
/// - `OutOfBounds` / `EntryCountTooLarge` if any of the three IFDs is corrupt
pub fn read_exif(buf: &[u8]) -> Result<ExifData<'_>, ExifError> {
    if buf.len() < MIN_FILE_SIZE {
        return Err(ExifError::FileTooSmall {
            required: MIN_FILE_SIZE,
            actual: buf.len(),
        });
    }

    let segment = find_app1(buf)?;

    let code_start = segment.payload_start();
    if slice_at(buf, code_start, EXIF_ID.len())? != EXIF_ID {
        return Err(ExifError::MissingExifCode);
    }

    let header = TiffHeader::parse(buf, code_start + EXIF_ID.len())?;
    let byte_order = header.byte_order;

    let zeroth = decode_ifd(
        buf,
        header.absolute(header.first_ifd_offset)?,
        header.base,
        byte_order,
    )?;
    let exif_ifd_offset = zeroth
        .find(ExifTag::ExifIfdPointer.as_u16())
        .and_then(|e| e.value.first_integer())
        .and_then(|v| u32::try_from(v).ok());
    let next_ifd_offset = zeroth.next_ifd_offset;

    let mut entries = zeroth.entries;

    if next_ifd_offset != 0 {
        let first = decode_ifd(
            buf,
            header.absolute(next_ifd_offset)?,
            header.base,
            byte_order,
        )?;
        entries.extend(first.entries);
    }

    if let Some(offset) = exif_ifd_offset {
        let sub = decode_ifd(buf, header.absolute(offset)?, header.base, byte_order)?;
        entries.extend(sub.entries);
    }

    debug!(
        base = header.base,
        ?byte_order,
        entries = entries.len(),
        "decoded Exif block"
    );

    Ok(ExifData {
        buf,
        header,
        entries,
    })
}

/// Decode camera metadata, reporting why decoding failed.
pub fn try_decode(buf: &[u8]) -> Result<MetaInfo, ExifError> {
    let exif = read_exif(buf)?;
    Ok(MetaInfo::from_exif(&exif))
}

/// Decode camera metadata from a whole JPEG file.
///
/// Never fails: any structural problem yields [`DEFAULT_META_INFO`].
/// Decoding is pure, so the same bytes always give the same record.
pub fn decode(buf: &[u8]) -> MetaInfo {
    match try_decode(buf) {
        Ok(info) => info,
        Err(e) => {
            debug!(error = %e, "no usable Exif metadata, using defaults");
            DEFAULT_META_INFO
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
