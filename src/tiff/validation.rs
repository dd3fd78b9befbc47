//! TIFF header validation
//!
//! The TIFF header inside an EXIF segment is checked before any directory
//! is read: byte order marker, magic number and the offset of IFD0.

use log::{debug, error};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::{ByteOrder, ByteReader};
use crate::tiff::constants::header;

/// Validated TIFF header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    pub byte_order: ByteOrder,
    /// Offset of IFD0, relative to the header start
    pub first_ifd_offset: u32,
}

/// Validates the TIFF header at `tiff_start`
///
/// # Arguments
/// * `reader` - Reader over the whole image buffer
/// * `tiff_start` - Absolute position of the byte order marker
///
/// # Returns
/// The header fields, or `InvalidByteOrder` / `InvalidTiffHeader`
pub fn validate_tiff_header(reader: &ByteReader, tiff_start: usize) -> MetadataResult<TiffHeader> {
    let byte_order = ByteOrder::detect(reader, tiff_start)?;
    debug!("Detected byte order: {}", byte_order.name());

    let magic = reader.read_u16(tiff_start + 2, byte_order)?;
    if magic != header::TIFF_MAGIC {
        error!("Invalid TIFF magic number: {:#06x}", magic);
        return Err(MetadataError::InvalidTiffHeader(format!(
            "magic number {:#06x}, expected {:#06x}",
            magic,
            header::TIFF_MAGIC
        )));
    }

    let first_ifd_offset = reader.read_u32(tiff_start + 4, byte_order)?;
    validate_first_ifd_offset(first_ifd_offset)?;

    Ok(TiffHeader { byte_order, first_ifd_offset })
}

/// Validates the IFD0 offset, which cannot point into the header itself
pub fn validate_first_ifd_offset(offset: u32) -> MetadataResult<()> {
    if offset < header::MIN_FIRST_IFD_OFFSET {
        return Err(MetadataError::InvalidTiffHeader(format!(
            "first IFD offset {} is below {}",
            offset,
            header::MIN_FIRST_IFD_OFFSET
        )));
    }

    Ok(())
}
