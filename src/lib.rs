//! # exif-overlay
//!
//! Reads camera settings straight out of the Exif block of a JPEG file and
//! lays them out as a caption for a photo overlay.
//!
//! The decoder works on the whole file held in memory. It never fails: a file
//! without a usable Exif block decodes to [`DEFAULT_META_INFO`].
//!
//! ## Features
//!
//! - **No image decoding**: Only the JPEG segment headers and the Exif block are touched
//! - **Both byte orders**: Little-endian (`II`) and big-endian (`MM`) TIFF blocks
//! - **Maker notes**: Recovers Panasonic lens names from the private maker-note IFD
//! - **Caption layout**: Formats exposure and aperture the way photographers write them
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`io`] - Bounds-checked byte readers and binary pattern search
//! - [`mod@format`] - JPEG segment scanner and TIFF directory decoder
//! - [`exif`] - Exif assembly and manufacturer lens resolvers
//! - [`caption`] - Fraction formatting and overlay caption layout
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_overlay::{decode, Caption, CaptionOptions};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let info = decode(&bytes);
//! println!("{} {}", info.camera_maker, info.camera_model);
//!
//! let caption = Caption::build(&info, &CaptionOptions::default());
//! println!("{}", caption);
//! ```

pub mod caption;
pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use caption::{
    fraction_to_string, round_ratio_tenths, Caption, CaptionOptions, FieldOverrides,
    FractionStyle, TextColor, TextPosition,
};
pub use config::{CaptionConfig, Cli, Command, InspectConfig, OutputFormat, TagsConfig};
pub use error::ExifError;
pub use exif::{
    decode, read_exif, try_decode, ExifData, Maker, MetaInfo, DEFAULT_META_INFO, EXIF_ID,
};
pub use format::tiff::{
    decode_ifd, decode_value, resolve_value, ByteOrder, ExifTag, FieldType, Fraction, Ifd,
    IfdEntry, TagValue, TiffHeader,
};
pub use format::{find_app1, is_jpeg, Segment};
pub use io::find_binary;
