//! Embedded thumbnail extraction
//!
//! IFD0's next-directory pointer leads to IFD1, which describes the
//! thumbnail. When IFD1 says the thumbnail is JPEG compressed, the bytes
//! at JpegIFOffset (relative to the TIFF header) are copied out.

use log::{debug, warn};

use crate::errors::MetadataResult;
use crate::tags::TagTables;
use crate::tiff::constants::{compression, tag_names, JPEG_MIME_TYPE};
use crate::tiff::ifd::IfdReader;
use crate::tiff::types::{ImageBlob, TagDirectory, TagValue};

/// Reads the thumbnail directory linked from IFD0
///
/// # Arguments
/// * `ifds` - Directory reader for the TIFF stream
/// * `first_ifd_offset` - IFD0 offset, relative to the TIFF header
/// * `tables` - Lookup tables (the IFD1 table is used)
///
/// # Returns
/// The IFD1 directory, empty when no IFD1 is linked. It holds a `blob`
/// entry with the JPEG bytes when the thumbnail is JPEG compressed.
pub fn read_thumbnail(ifds: &IfdReader, first_ifd_offset: u32, tables: &TagTables) -> MetadataResult<TagDirectory> {
    let ifd0_start = ifds.absolute(first_ifd_offset)?;
    let ifd1_offset = ifds.read_next_ifd_offset(ifd0_start)?;

    if ifd1_offset == 0 {
        debug!("No IFD1 linked, no thumbnail");
        return Ok(TagDirectory::new());
    }
    if ifd1_offset as usize > ifds.buffer().len() {
        warn!("IFD1 offset {} exceeds buffer length {}", ifd1_offset, ifds.buffer().len());
        return Ok(TagDirectory::new());
    }

    let mut thumbnail = ifds.read_directory(ifds.absolute(ifd1_offset)?, &tables.ifd1)?;

    if thumbnail.get_integer(tag_names::COMPRESSION) == Some(compression::JPEG) {
        let offset = thumbnail.get_integer(tag_names::JPEG_IF_OFFSET).unwrap_or(0);
        let length = thumbnail.get_integer(tag_names::JPEG_IF_BYTE_COUNT).unwrap_or(0);

        if offset > 0 && length > 0 {
            match slice_thumbnail(ifds, offset, length) {
                Ok(data) => {
                    debug!("Extracted {} byte JPEG thumbnail", data.len());
                    thumbnail.insert(tag_names::BLOB, TagValue::Blob(ImageBlob::new(JPEG_MIME_TYPE, data)));
                }
                Err(e) => warn!("Thumbnail image unavailable: {}", e),
            }
        }
    }

    Ok(thumbnail)
}

fn slice_thumbnail(ifds: &IfdReader, offset: i64, length: i64) -> MetadataResult<Vec<u8>> {
    // Both come from LONG tags, so they fit in u32
    let start = ifds.absolute(offset as u32)?;
    ifds.buffer().read_bytes(start, length as usize)
}
