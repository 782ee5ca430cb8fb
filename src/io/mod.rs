//! Byte-level helpers shared by the container parsers.
//!
//! Everything here works on an in-memory buffer holding the whole file.
//! Reads that could run past the end of that buffer go through
//! [`slice_at`], which turns the overrun into an [`ExifError::OutOfBounds`].
//!
//! [`ExifError::OutOfBounds`]: crate::error::ExifError::OutOfBounds

mod endian;
mod search;

pub use endian::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, slice_at};
pub use search::find_binary;
