//! Manufacturer-specific lens name recovery.
//!
//! The standard LensModel tag (0xA434) is enough for Olympus and Sigma
//! files. Panasonic leaves it out and keeps the lens name in its maker note,
//! a private IFD whose declared offset cannot be trusted. The note is
//! therefore located again by content before its directory is decoded.
//!
//! ```text
//! Panasonic maker note
//! Bytes 0-11:  "Panasonic\0\0\0" sub-header
//! Bytes 12..:  IFD in the outer byte order, offsets relative to the
//!              outer TIFF header
//!              tag 0x0051 (Ascii) = lens name
//! ```

use tracing::debug;

use crate::format::tiff::{decode_ifd, ExifTag};
use crate::io::find_binary;

use super::ExifData;

/// Length of the sub-header in front of the Panasonic maker-note IFD
pub const PANASONIC_NOTE_HEADER_SIZE: usize = 12;

/// Panasonic maker-note tag holding the lens name
pub const PANASONIC_LENS_TAG: u16 = 0x0051;

/// Camera manufacturers with known lens-name behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maker {
    /// Lens name lives in the maker note
    Panasonic,

    /// Standard LensModel tag is reliable
    Olympus,

    /// Standard LensModel tag is reliable
    Sigma,

    /// Anything else; the standard tag is used as-is
    Other,
}

impl Maker {
    /// Identify the manufacturer from the Exif Make string.
    ///
    /// Matches brand tokens anywhere in the string, since vendors pad or
    /// prefix the Make value (`"Panasonic"`, `"OLYMPUS IMAGING CORP."`,
    /// `"OM Digital Solutions"`, `"SIGMA"`).
    pub fn from_camera_maker(camera_maker: &str) -> Self {
        const BRANDS: &[(&str, Maker)] = &[
            ("Panasonic", Maker::Panasonic),
            ("OLYMPUS", Maker::Olympus),
            ("Olympus", Maker::Olympus),
            ("OM Digital", Maker::Olympus),
            ("SIGMA", Maker::Sigma),
            ("Sigma", Maker::Sigma),
        ];

        BRANDS
            .iter()
            .find(|(token, _)| camera_maker.contains(token))
            .map(|&(_, maker)| maker)
            .unwrap_or(Maker::Other)
    }

    /// Recover a lens name the standard tag could not provide.
    ///
    /// Returns `None` when this maker has no special handling or when its
    /// private data does not yield a name; the caller keeps its current
    /// value in that case.
    pub fn resolve_lens_name(self, exif: &ExifData<'_>) -> Option<String> {
        match self {
            Maker::Panasonic => panasonic_lens_name(exif),
            Maker::Olympus | Maker::Sigma | Maker::Other => None,
        }
    }
}

fn panasonic_lens_name(exif: &ExifData<'_>) -> Option<String> {
    let Some(note) = exif
        .find(ExifTag::MakerNote)
        .and_then(|e| e.value.as_bytes())
    else {
        debug!("Panasonic file without a maker note");
        return None;
    };

    let Some(position) = find_binary(exif.buffer(), note) else {
        debug!(len = note.len(), "maker note bytes not found in file");
        return None;
    };

    let ifd = match decode_ifd(
        exif.buffer(),
        position + PANASONIC_NOTE_HEADER_SIZE,
        exif.base(),
        exif.byte_order(),
    ) {
        Ok(ifd) => ifd,
        Err(e) => {
            debug!(error = %e, position, "unreadable Panasonic maker note");
            return None;
        }
    };

    let lens = ifd.find(PANASONIC_LENS_TAG)?.value.as_text()?.trim();
    if lens.is_empty() {
        None
    } else {
        Some(lens.to_string())
    }
}
