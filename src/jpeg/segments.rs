//! JPEG marker scanning
//!
//! Locates the regions the metadata decoders work on: the EXIF payload of
//! the first APP1 segment, the Photoshop IPTC resource and XMP packet
//! candidates. Only the EXIF scan follows the segment structure; the IPTC
//! and XMP scans search the raw bytes.

use log::{debug, trace, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::{ByteOrder, ByteReader};

/// Marker bytes and signatures
pub mod markers {
    /// Start of image
    pub const SOI: [u8; 2] = [0xFF, 0xD8];
    /// Every marker starts with this byte
    pub const PREFIX: u8 = 0xFF;
    /// APP1, holds EXIF (and XMP) data
    pub const APP1: u8 = 0xE1;
    /// Start of scan, entropy-coded data follows
    pub const SOS: u8 = 0xDA;
    /// End of image
    pub const EOI: u8 = 0xD9;
    /// Photoshop image resource "8BIM" with resource type 0x0404 (IPTC-NAA)
    pub const IPTC_RESOURCE: [u8; 6] = [0x38, 0x42, 0x49, 0x4D, 0x04, 0x04];
    /// Literal that anchors the XMP search
    pub const XMP_ANCHOR: &[u8] = b"http";
}

/// Location of the IIM records inside a Photoshop resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IptcSection {
    /// Absolute offset of the first record
    pub start: usize,
    /// Section length in bytes
    pub length: usize,
}

/// A candidate XMP region found by the "http" heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmpSection {
    pub start: usize,
    pub length: usize,
}

/// Fails with `NotAJpeg` unless the buffer starts with the SOI marker
pub fn check_soi(reader: &ByteReader) -> MetadataResult<()> {
    if reader.matches_at(0, &markers::SOI) {
        Ok(())
    } else {
        Err(MetadataError::NotAJpeg)
    }
}

/// Walks the marker segments up to the first APP1
///
/// # Returns
/// The absolute offset of the APP1 payload (4 bytes past the marker),
/// `NotAJpeg` if a segment does not start with 0xFF, or `NoExifSegment`
/// when the image data or the end of the buffer is reached first
pub fn find_exif_segment(reader: &ByteReader) -> MetadataResult<usize> {
    check_soi(reader)?;

    let mut offset = markers::SOI.len();
    while offset < reader.len() {
        if reader.read_u8(offset)? != markers::PREFIX {
            warn!("Expected a marker at offset {}", offset);
            return Err(MetadataError::NotAJpeg);
        }

        let marker = reader.read_u8(offset + 1).map_err(|_| MetadataError::NoExifSegment)?;
        trace!("Marker {:#04x} at offset {}", marker, offset);

        match marker {
            markers::APP1 => {
                debug!("Found APP1 segment at offset {}", offset);
                return Ok(offset + 4);
            }
            markers::SOS | markers::EOI => break,
            _ => {}
        }

        let length = reader
            .read_u16(offset + 2, ByteOrder::BigEndian)
            .map_err(|_| MetadataError::NoExifSegment)?;
        offset += 2 + length as usize;
    }

    Err(MetadataError::NoExifSegment)
}

/// Searches byte by byte for the Photoshop IPTC resource
///
/// The resource name is a padded Pascal string; its length byte is taken
/// from offset 7 of the resource, rounded up to even, and an empty name
/// counts as 4 bytes. The section length is the 16-bit value right after
/// the padded name.
///
/// # Returns
/// The section, `None` if there is no resource, or `OutOfBounds` if the
/// resource header is truncated
pub fn find_iptc_section(reader: &ByteReader) -> MetadataResult<Option<IptcSection>> {
    check_soi(reader)?;

    let found = (markers::SOI.len()..reader.len()).find(|&offset| reader.matches_at(offset, &markers::IPTC_RESOURCE));
    let offset = match found {
        Some(offset) => offset,
        None => return Ok(None),
    };

    let mut name_length = reader.read_u8(offset + 7)? as usize;
    if name_length % 2 != 0 {
        name_length += 1;
    }
    if name_length == 0 {
        name_length = 4;
    }

    let start = offset + 8 + name_length;
    let length = reader.read_u16(offset + 6 + name_length, ByteOrder::BigEndian)? as usize;
    debug!("IPTC resource at offset {}: {} bytes from {}", offset, length, start);

    Ok(Some(IptcSection { start, length }))
}

/// XMP candidate regions, in buffer order
///
/// For every "http" at offset `p` the region starts at `p - 1` and spans
/// the big-endian 16-bit value at `p - 2`, minus one. In an XMP APP1
/// segment that value is the segment length, so the region covers the
/// whole payload. The caller decides whether a candidate holds a packet.
pub fn xmp_sections<'a>(reader: &'a ByteReader<'a>) -> impl Iterator<Item = XmpSection> + 'a {
    let end = reader.len().saturating_sub(markers::XMP_ANCHOR.len());

    (markers::SOI.len()..end)
        .filter(move |&offset| reader.matches_at(offset, markers::XMP_ANCHOR))
        .filter_map(move |offset| {
            let length = reader.read_u16(offset - 2, ByteOrder::BigEndian).ok()?;
            Some(XmpSection {
                start: offset - 1,
                length: (length as usize).saturating_sub(1),
            })
        })
}
