//! EXIF stream parsing
//!
//! Reads the TIFF stream inside an APP1 payload: IFD0, the Exif and GPS
//! sub-directories it points to, and the IFD1 thumbnail, merged into one
//! tag directory.

use log::{debug, info, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::ByteReader;
use crate::tags::{TagNameTable, TagTables};
use crate::tiff::constants::{header, tag_names};
use crate::tiff::ifd::IfdReader;
use crate::tiff::postprocess;
use crate::tiff::thumbnail;
use crate::tiff::types::{TagDirectory, TagValue};
use crate::tiff::validation;

/// Parses the EXIF payload starting at `start`
///
/// # Arguments
/// * `reader` - Reader over the whole image buffer
/// * `start` - Absolute position of the APP1 payload ("Exif\0\0")
/// * `tables` - Lookup tables
///
/// # Returns
/// IFD0 tags with Exif and GPS tags merged in and a `thumbnail` directory,
/// `NoExifData` if the signature is missing, or a header error
pub fn read_exif_data(reader: &ByteReader, start: usize, tables: &TagTables) -> MetadataResult<TagDirectory> {
    if !reader.matches_at(start, header::EXIF_SIGNATURE) {
        return Err(MetadataError::NoExifData);
    }

    let tiff_start = start + header::TIFF_HEADER_DISTANCE;
    let tiff_header = validation::validate_tiff_header(reader, tiff_start)?;
    let ifds = IfdReader::new(*reader, tiff_start, tiff_header.byte_order);

    let mut tags = ifds.read_directory(ifds.absolute(tiff_header.first_ifd_offset)?, &tables.tiff)?;

    if let Some(exif_data) = read_sub_directory(&ifds, &tags, tag_names::EXIF_IFD_POINTER, &tables.exif) {
        for (name, value) in exif_data {
            match postprocess::process_exif_tag(&name, value, tables) {
                Some(value) => {
                    tags.insert(name, value);
                }
                None => {
                    tags.remove(&name);
                }
            }
        }
    }

    if let Some(gps_data) = read_sub_directory(&ifds, &tags, tag_names::GPS_INFO_IFD_POINTER, &tables.gps) {
        for (name, value) in gps_data {
            let value = postprocess::process_gps_tag(&name, value);
            debug!("GPS tag {} ({}): {}", name, value.kind(), value);
            tags.insert(name, value);
        }
    }

    let thumbnail = thumbnail::read_thumbnail(&ifds, tiff_header.first_ifd_offset, tables).unwrap_or_else(|e| {
        warn!("Thumbnail directory unavailable: {}", e);
        TagDirectory::new()
    });
    tags.insert(tag_names::THUMBNAIL, TagValue::Directory(thumbnail));

    info!("Decoded {} EXIF tags ({})", tags.len(), tiff_header.byte_order.name());
    Ok(tags)
}

/// Reads the sub-directory `pointer_name` points to, if any
///
/// A missing or zero pointer means no sub-directory. A sub-directory that
/// cannot be read is logged and treated as absent.
fn read_sub_directory(
    ifds: &IfdReader,
    tags: &TagDirectory,
    pointer_name: &str,
    table: &TagNameTable,
) -> Option<TagDirectory> {
    let pointer = tags.get_integer(pointer_name).filter(|&p| p > 0)?;
    debug!("Following {} to offset {}", pointer_name, pointer);

    let result = u32::try_from(pointer)
        .map_err(|_| MetadataError::GenericError(format!("{} out of range: {}", pointer_name, pointer)))
        .and_then(|p| ifds.absolute(p))
        .and_then(|start| ifds.read_directory(start, table));

    match result {
        Ok(directory) => Some(directory),
        Err(e) => {
            warn!("Skipping directory at {} {}: {}", pointer_name, pointer, e);
            None
        }
    }
}
