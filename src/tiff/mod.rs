//! TIFF/EXIF parsing module
//!
//! This module provides structures and functions for reading the TIFF
//! stream embedded in a JPEG APP1 segment: directories, tag values, the
//! semantic rewrites applied to Exif and GPS tags, and the thumbnail.

pub mod constants;
pub mod exif;
pub mod ifd;
pub mod postprocess;
pub mod thumbnail;
pub mod types;
pub mod validation;
pub mod values;
#[cfg(test)]
mod tests;

pub use exif::read_exif_data;
pub use ifd::{IFDEntry, IfdReader};
pub use types::{ImageBlob, TagDirectory, TagValue};
pub use validation::TiffHeader;
