//! IIM record scanning
//!
//! Records are `1C 02 <dataset> <size:i16 BE> <data>`. The scan moves one
//! byte at a time through the section, since records are not guaranteed
//! to sit on record boundaries.

use std::collections::HashMap;
use log::{debug, trace, warn};

use crate::errors::MetadataResult;
use crate::io::{ByteOrder, ByteReader};
use crate::iptc::IptcFieldMap;
use crate::jpeg::segments::IptcSection;

/// Marker that opens an application record (record 2) dataset
const RECORD_MARKER: [u8; 2] = [0x1C, 0x02];

/// Offset of the data bytes from the record marker
const RECORD_HEADER_SIZE: usize = 5;

/// Reads the IIM records of `section`
///
/// # Arguments
/// * `reader` - Reader over the whole image buffer
/// * `section` - Section located by the JPEG scanner
/// * `field_names` - Dataset number to field name
///
/// # Returns
/// The mapped fields; datasets missing from `field_names` are skipped.
/// A record that runs past the buffer ends the scan, keeping the fields
/// read so far.
pub fn read_iptc_data(
    reader: &ByteReader,
    section: &IptcSection,
    field_names: &HashMap<u8, String>,
) -> MetadataResult<IptcFieldMap> {
    let mut fields = IptcFieldMap::new();
    let end = section.start.saturating_add(section.length);

    for position in section.start..end {
        if !reader.matches_at(position, &RECORD_MARKER) {
            continue;
        }

        match read_record(reader, position, field_names) {
            Ok(Some((name, value))) => {
                trace!("IPTC {} at {}: {:?}", name, position, value);
                fields.append(name, value);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Stopping IPTC scan at {}: {}", position, e);
                break;
            }
        }
    }

    debug!("Decoded {} IPTC fields", fields.len());
    Ok(fields)
}

/// Reads the record at `position`, if its dataset is a known field
fn read_record<'t>(
    reader: &ByteReader,
    position: usize,
    field_names: &'t HashMap<u8, String>,
) -> MetadataResult<Option<(&'t str, String)>> {
    let dataset = reader.read_u8(position + 2)?;
    let name = match field_names.get(&dataset) {
        Some(name) => name,
        None => return Ok(None),
    };

    let size = reader.read_i16(position + 3, ByteOrder::BigEndian)?;
    // Negative sizes read as empty
    let value = if size > 0 {
        reader.read_string(position + RECORD_HEADER_SIZE, size as usize)?
    } else {
        String::new()
    };

    Ok(Some((name.as_str(), value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iptc::IptcValue;
    use crate::jpeg::segments::find_iptc_section;
    use crate::tags::TAG_TABLES;
    use crate::test_utils::{app13_iptc_segment, iptc_record, jpeg};

    fn decode(iim: &[u8]) -> IptcFieldMap {
        let data = jpeg(&[app13_iptc_segment(iim)]);
        let reader = ByteReader::new(&data);
        let section = find_iptc_section(&reader).unwrap().unwrap();
        read_iptc_data(&reader, &section, &TAG_TABLES.iptc_fields).unwrap()
    }

    #[test]
    fn test_single_caption_is_a_string() {
        let fields = decode(&iptc_record(0x78, "Harbour at dusk"));
        assert_eq!(fields.get("caption"), Some(&IptcValue::Single("Harbour at dusk".to_string())));
    }

    #[test]
    fn test_two_captions_become_a_list() {
        let mut iim = iptc_record(0x78, "first");
        iim.extend(iptc_record(0x78, "second"));

        let fields = decode(&iim);
        assert_eq!(
            fields.get("caption"),
            Some(&IptcValue::Multiple(vec!["first".to_string(), "second".to_string()]))
        );
    }

    #[test]
    fn test_unknown_dataset_is_skipped() {
        let mut iim = iptc_record(0x05, "object name");
        iim.extend(iptc_record(0x50, "J. Doe"));

        let fields = decode(&iim);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("byline").and_then(IptcValue::as_single), Some("J. Doe"));
    }

    #[test]
    fn test_latin1_payload() {
        let mut iim = vec![0x1C, 0x02, 0x74, 0x00, 0x06];
        iim.extend_from_slice(&[0xA9, b' ', b'2', b'0', b'2', b'4']);

        let fields = decode(&iim);
        assert_eq!(fields.get("copyright").and_then(IptcValue::as_single), Some("\u{a9} 2024"));
    }

    #[test]
    fn test_truncated_record_keeps_earlier_fields() {
        let mut data = vec![0xFF, 0xD8];
        data.extend(iptc_record(0x69, "Headline"));
        data.extend_from_slice(&[0x1C, 0x02, 0x78, 0x00, 0x40, b'x']);
        let reader = ByteReader::new(&data);

        let section = IptcSection { start: 2, length: data.len() - 2 };
        let fields = read_iptc_data(&reader, &section, &TAG_TABLES.iptc_fields).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("headline").and_then(IptcValue::as_single), Some("Headline"));
    }
}
