//! Tag value decoding
//!
//! Decodes the value of a single directory entry according to its TIFF
//! field type and count. Values no larger than four bytes live inside the
//! entry itself; larger ones are stored at an offset relative to the TIFF
//! header.

use log::trace;

use crate::errors::{MetadataError, MetadataResult};
use crate::io::{ByteOrder, ByteReader};
use crate::tiff::constants::field_types;
use crate::tiff::ifd::IFDEntry;
use crate::tiff::types::TagValue;

/// Decodes the value of `entry`
///
/// # Arguments
/// * `reader` - Reader over the whole image buffer
/// * `entry` - The directory entry to decode
/// * `tiff_start` - Absolute offset of the TIFF header
/// * `order` - Byte order of the TIFF stream
///
/// # Returns
/// The decoded value, `None` for field types this decoder does not handle,
/// or `OutOfBounds` if the value lies past the end of the buffer
pub fn read_tag_value(
    reader: &ByteReader,
    entry: &IFDEntry,
    tiff_start: usize,
    order: ByteOrder,
) -> MetadataResult<Option<TagValue>> {
    let width = match entry.get_field_type_size() {
        Some(width) => width,
        None => {
            trace!("Tag {:#06x}: unsupported field type {}, skipping", entry.tag, entry.field_type);
            return Ok(None);
        }
    };

    let count = entry.count as usize;
    let position = value_position(entry, tiff_start)?;

    let total = width.checked_mul(count).ok_or(MetadataError::OutOfBounds {
        offset: position,
        length: usize::MAX,
        buffer_len: reader.len(),
    })?;
    reader.ensure(position, total)?;

    let value = match entry.field_type {
        field_types::BYTE | field_types::UNDEFINED => {
            integers(count, |n| reader.read_u8(position + n).map(i64::from))?
        }
        field_types::ASCII => {
            TagValue::Text(reader.read_string(position, count.saturating_sub(1))?)
        }
        field_types::SHORT => {
            integers(count, |n| reader.read_u16(position + 2 * n, order).map(i64::from))?
        }
        field_types::LONG => {
            integers(count, |n| reader.read_u32(position + 4 * n, order).map(i64::from))?
        }
        field_types::SLONG => {
            integers(count, |n| reader.read_i32(position + 4 * n, order).map(i64::from))?
        }
        field_types::RATIONAL => reals(count, |n| {
            let numerator = reader.read_u32(position + 8 * n, order)?;
            let denominator = reader.read_u32(position + 8 * n + 4, order)?;
            Ok(f64::from(numerator) / f64::from(denominator))
        })?,
        field_types::SRATIONAL => reals(count, |n| {
            let numerator = reader.read_i32(position + 8 * n, order)?;
            let denominator = reader.read_i32(position + 8 * n + 4, order)?;
            Ok(f64::from(numerator) / f64::from(denominator))
        })?,
        _ => return Ok(None),
    };

    Ok(Some(value))
}

/// Absolute position of an entry's value, inline or out-of-line
fn value_position(entry: &IFDEntry, tiff_start: usize) -> MetadataResult<usize> {
    if entry.is_value_inline() {
        return Ok(entry.value_field_position());
    }

    tiff_start
        .checked_add(entry.value_offset as usize)
        .ok_or(MetadataError::OutOfBounds {
            offset: tiff_start,
            length: entry.value_offset as usize,
            buffer_len: usize::MAX,
        })
}

/// A single integer when `count` is one, a list otherwise
fn integers<F>(count: usize, read: F) -> MetadataResult<TagValue>
where
    F: Fn(usize) -> MetadataResult<i64>,
{
    if count == 1 {
        return Ok(TagValue::Integer(read(0)?));
    }
    let values = (0..count).map(read).collect::<MetadataResult<Vec<_>>>()?;
    Ok(TagValue::IntegerList(values))
}

/// A single real when `count` is one, a list otherwise
///
/// Zero denominators follow IEEE division: `n/0` is infinite and `0/0` is NaN.
fn reals<F>(count: usize, read: F) -> MetadataResult<TagValue>
where
    F: Fn(usize) -> MetadataResult<f64>,
{
    if count == 1 {
        return Ok(TagValue::Real(read(0)?));
    }
    let values = (0..count).map(read).collect::<MetadataResult<Vec<_>>>()?;
    Ok(TagValue::RealList(values))
}
