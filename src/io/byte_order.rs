//! Byte order handling for TIFF streams
//!
//! A TIFF stream embedded in an EXIF segment announces its byte order with
//! a two byte marker; every multi-byte field of that stream is then read
//! with the detected order.

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::byte_reader::ByteReader;
use crate::tiff::constants::header;

/// Represents the byte order of a TIFF stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Detects the byte order from the marker at `offset`
    pub fn detect(reader: &ByteReader, offset: usize) -> MetadataResult<Self> {
        let marker = reader.read_u16(offset, ByteOrder::BigEndian)?;
        Self::from_marker(marker)
    }

    /// Maps a raw marker value to a byte order
    pub fn from_marker(marker: u16) -> MetadataResult<Self> {
        match marker {
            header::LITTLE_ENDIAN_MARKER => Ok(ByteOrder::LittleEndian), // "II" (Intel)
            header::BIG_ENDIAN_MARKER => Ok(ByteOrder::BigEndian),       // "MM" (Motorola)
            _ => Err(MetadataError::InvalidByteOrder(marker)),
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    // The slice helpers below expect exactly-sized input; ByteReader
    // guarantees that before calling them.

    pub(crate) fn u16_from(&self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_u16(bytes),
            ByteOrder::BigEndian => BigEndian::read_u16(bytes),
        }
    }

    pub(crate) fn i16_from(&self, bytes: &[u8]) -> i16 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_i16(bytes),
            ByteOrder::BigEndian => BigEndian::read_i16(bytes),
        }
    }

    pub(crate) fn u32_from(&self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_u32(bytes),
            ByteOrder::BigEndian => BigEndian::read_u32(bytes),
        }
    }

    pub(crate) fn i32_from(&self, bytes: &[u8]) -> i32 {
        match self {
            ByteOrder::LittleEndian => LittleEndian::read_i32(bytes),
            ByteOrder::BigEndian => BigEndian::read_i32(bytes),
        }
    }
}
