//! Bounds-checked access to an in-memory image buffer
//!
//! Every offset handed to the decoders comes from the file itself, so no
//! read is allowed to assume it lands inside the buffer. All accessors
//! return `MetadataError::OutOfBounds` instead of panicking.

use crate::errors::{MetadataError, MetadataResult};
use crate::io::byte_order::ByteOrder;
use crate::utils::string_utils;

/// Read-only view over a complete image buffer
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Creates a reader over `data`
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data }
    }

    /// Total buffer length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `length` bytes starting at `offset`
    ///
    /// # Arguments
    /// * `offset` - Absolute offset into the buffer
    /// * `length` - Number of bytes requested
    ///
    /// # Returns
    /// The borrowed slice, or `OutOfBounds` if any part of it lies past the end
    pub fn slice(&self, offset: usize, length: usize) -> MetadataResult<&'a [u8]> {
        offset
            .checked_add(length)
            .and_then(|end| self.data.get(offset..end))
            .ok_or(MetadataError::OutOfBounds {
                offset,
                length,
                buffer_len: self.data.len(),
            })
    }

    /// Checks that `length` bytes at `offset` are readable
    pub fn ensure(&self, offset: usize, length: usize) -> MetadataResult<()> {
        self.slice(offset, length).map(|_| ())
    }

    pub fn read_u8(&self, offset: usize) -> MetadataResult<u8> {
        Ok(self.slice(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> MetadataResult<u16> {
        Ok(order.u16_from(self.slice(offset, 2)?))
    }

    pub fn read_i16(&self, offset: usize, order: ByteOrder) -> MetadataResult<i16> {
        Ok(order.i16_from(self.slice(offset, 2)?))
    }

    pub fn read_u32(&self, offset: usize, order: ByteOrder) -> MetadataResult<u32> {
        Ok(order.u32_from(self.slice(offset, 4)?))
    }

    pub fn read_i32(&self, offset: usize, order: ByteOrder) -> MetadataResult<i32> {
        Ok(order.i32_from(self.slice(offset, 4)?))
    }

    /// Reads bytes as a Latin-1 string, one byte per character
    ///
    /// The text encoding declared by the surrounding format is ignored.
    pub fn read_string(&self, offset: usize, length: usize) -> MetadataResult<String> {
        Ok(string_utils::latin1_to_string(self.slice(offset, length)?))
    }

    /// Copies `length` bytes at `offset` into an owned buffer
    pub fn read_bytes(&self, offset: usize, length: usize) -> MetadataResult<Vec<u8>> {
        Ok(self.slice(offset, length)?.to_vec())
    }

    /// Whether the bytes at `offset` equal `pattern`
    ///
    /// A pattern running past the end of the buffer never matches.
    pub fn matches_at(&self, offset: usize, pattern: &[u8]) -> bool {
        self.slice(offset, pattern.len())
            .map(|bytes| bytes == pattern)
            .unwrap_or(false)
    }
}
