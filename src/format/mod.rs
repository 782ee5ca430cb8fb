//! Container parsers.
//!
//! - [`jpeg`] walks JPEG marker segments to find the APP1 segment
//! - [`tiff`] decodes the TIFF-structured Exif block inside it

pub mod jpeg;
pub mod tiff;

pub use jpeg::{find_app1, is_jpeg, Segment};
