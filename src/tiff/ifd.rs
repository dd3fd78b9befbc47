//! Image File Directory (IFD) structures and reading
//!
//! An IFD is a two byte entry count followed by that many 12 byte entries
//! and a four byte pointer to the next directory. Each entry carries a tag
//! code, a field type, a value count and either the value itself or an
//! offset to it, relative to the TIFF header.

use log::{debug, trace, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::{ByteOrder, ByteReader};
use crate::tags::TagNameTable;
use crate::tiff::constants::{field_types, ifd_layout};
use crate::tiff::types::TagDirectory;
use crate::tiff::values;

/// Represents an entry in an Image File Directory (IFD)
///
/// Each entry describes one tag using a code, a type and a count. The
/// field_type determines how to interpret the value or offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IFDEntry {
    /// TIFF tag identifier
    pub tag: u16,
    /// Field type
    pub field_type: u16,
    /// Number of values
    pub count: u32,
    /// Value or offset to values
    pub value_offset: u32,
    /// Absolute position of this entry in the buffer
    pub position: usize,
}

impl IFDEntry {
    /// Reads the 12 byte entry at `position`
    pub fn read(reader: &ByteReader, position: usize, order: ByteOrder) -> MetadataResult<Self> {
        reader.ensure(position, ifd_layout::ENTRY_SIZE)?;

        Ok(IFDEntry {
            tag: reader.read_u16(position, order)?,
            field_type: reader.read_u16(position + 2, order)?,
            count: reader.read_u32(position + 4, order)?,
            value_offset: reader.read_u32(position + ifd_layout::VALUE_FIELD_OFFSET, order)?,
            position,
        })
    }

    /// Get the size in bytes for this entry's field type
    ///
    /// Returns `None` for field types the decoder does not handle.
    pub fn get_field_type_size(&self) -> Option<usize> {
        match self.field_type {
            field_types::BYTE | field_types::ASCII | field_types::UNDEFINED => Some(1),
            field_types::SHORT => Some(2),
            field_types::LONG | field_types::SLONG => Some(4),
            field_types::RATIONAL | field_types::SRATIONAL => Some(8),
            _ => None,
        }
    }

    /// Determines if the value is stored inline in the entry
    /// rather than at the offset location
    pub fn is_value_inline(&self) -> bool {
        match self.get_field_type_size() {
            Some(size) => (size as u64) * (self.count as u64) <= ifd_layout::INLINE_VALUE_SIZE as u64,
            None => false,
        }
    }

    /// Absolute position of the value/offset field
    pub fn value_field_position(&self) -> usize {
        self.position + ifd_layout::VALUE_FIELD_OFFSET
    }

    /// Returns a human-readable description of this entry
    pub fn description(&self) -> String {
        format!("Tag: {:#06x}, Type: {}, Count: {}, Value/Offset: {}",
                self.tag, self.field_type, self.count, self.value_offset)
    }
}

/// Reads directories of one TIFF stream
///
/// All directory and value offsets inside the stream are relative to
/// `tiff_start`, the position of the byte order marker.
#[derive(Debug, Clone, Copy)]
pub struct IfdReader<'a> {
    reader: ByteReader<'a>,
    tiff_start: usize,
    byte_order: ByteOrder,
}

impl<'a> IfdReader<'a> {
    pub fn new(reader: ByteReader<'a>, tiff_start: usize, byte_order: ByteOrder) -> Self {
        IfdReader { reader, tiff_start, byte_order }
    }

    pub fn buffer(&self) -> &ByteReader<'a> {
        &self.reader
    }

    /// Converts a stream-relative offset into an absolute buffer position
    pub fn absolute(&self, relative: u32) -> MetadataResult<usize> {
        self.tiff_start
            .checked_add(relative as usize)
            .ok_or(MetadataError::OutOfBounds {
                offset: self.tiff_start,
                length: relative as usize,
                buffer_len: self.reader.len(),
            })
    }

    /// Reads the entry count of the directory at `dir_start`
    pub fn read_entry_count(&self, dir_start: usize) -> MetadataResult<u16> {
        self.reader.read_u16(dir_start, self.byte_order)
    }

    /// Reads the directory at absolute position `dir_start`
    ///
    /// Tags whose code is missing from `table` are dropped. An entry whose
    /// header or value cannot be read is logged and skipped; only an
    /// unreadable entry count fails the whole directory.
    ///
    /// # Arguments
    /// * `dir_start` - Absolute position of the directory's entry count
    /// * `table` - Tag code to tag name table for this kind of directory
    ///
    /// # Returns
    /// The decoded directory
    pub fn read_directory(&self, dir_start: usize, table: &TagNameTable) -> MetadataResult<TagDirectory> {
        let entry_count = self.read_entry_count(dir_start)?;
        debug!("Reading directory at {} with {} entries", dir_start, entry_count);

        let mut directory = TagDirectory::new();

        for i in 0..entry_count as usize {
            let position = dir_start + ifd_layout::ENTRY_COUNT_SIZE + i * ifd_layout::ENTRY_SIZE;

            let entry = match IFDEntry::read(&self.reader, position, self.byte_order) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Directory at {} truncated after {} of {} entries: {}",
                          dir_start, i, entry_count, e);
                    break;
                }
            };
            trace!("Read IFD entry: {}", entry.description());

            let name = match table.get(&entry.tag) {
                Some(name) => name,
                None => {
                    trace!("Unknown tag {:#06x}, skipping", entry.tag);
                    continue;
                }
            };

            match values::read_tag_value(&self.reader, &entry, self.tiff_start, self.byte_order) {
                Ok(Some(value)) => {
                    directory.insert(name.clone(), value);
                }
                Ok(None) => {}
                Err(e) => warn!("Tag {} unavailable: {}", name, e),
            }
        }

        debug!("Read directory with {} tags", directory.len());
        Ok(directory)
    }

    /// Reads the pointer following the last entry of the directory at `dir_start`
    ///
    /// A value of 0 means no directory is linked.
    pub fn read_next_ifd_offset(&self, dir_start: usize) -> MetadataResult<u32> {
        let entry_count = self.read_entry_count(dir_start)? as usize;
        let pointer_position = dir_start + ifd_layout::ENTRY_COUNT_SIZE + entry_count * ifd_layout::ENTRY_SIZE;
        self.reader.read_u32(pointer_position, self.byte_order)
    }
}
