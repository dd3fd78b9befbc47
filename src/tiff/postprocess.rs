//! Semantic rewriting of decoded EXIF and GPS values
//!
//! Enumerated codes become their descriptive strings, version byte arrays
//! become version strings. Applied to Exif and GPS sub-directory entries as
//! they are merged into the main tag set.

use log::debug;

use crate::tags::TagTables;
use crate::tiff::constants::tag_names;
use crate::tiff::types::TagValue;

/// Exif tags whose numeric code maps to a descriptive string
pub const ENUMERATED_TAGS: [&str; 15] = [
    "LightSource",
    "Flash",
    "MeteringMode",
    "ExposureProgram",
    "SensingMethod",
    "SceneCaptureType",
    "SceneType",
    "CustomRendered",
    "WhiteBalance",
    "GainControl",
    "Contrast",
    "Saturation",
    "Sharpness",
    "SubjectDistanceRange",
    "FileSource",
];

/// Rewrites an Exif sub-directory value
///
/// # Returns
/// The value to merge, or `None` when an enumerated code has no string
pub fn process_exif_tag(name: &str, value: TagValue, tables: &TagTables) -> Option<TagValue> {
    if ENUMERATED_TAGS.contains(&name) {
        return describe_code(name, &value, tables);
    }

    match name {
        tag_names::EXIF_VERSION | tag_names::FLASHPIX_VERSION => Some(version_string(value)),
        tag_names::COMPONENTS_CONFIGURATION => Some(components_string(value, tables)),
        _ => Some(value),
    }
}

/// Rewrites a GPS sub-directory value
pub fn process_gps_tag(name: &str, value: TagValue) -> TagValue {
    if name != tag_names::GPS_VERSION_ID {
        return value;
    }

    match first_four(&value) {
        Some(parts) => TagValue::Text(
            parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join("."),
        ),
        None => value,
    }
}

fn describe_code(name: &str, value: &TagValue, tables: &TagTables) -> Option<TagValue> {
    let description = value
        .as_integer()
        .and_then(|code| u32::try_from(code).ok())
        .and_then(|code| tables.value_strings(name)?.get(&code));

    match description {
        Some(text) => Some(TagValue::Text(text.clone())),
        None => {
            debug!("{} has no description for value {}", name, value);
            None
        }
    }
}

/// Four bytes read as ASCII characters, e.g. `[0x30, 0x32, 0x32, 0x30]` to "0220"
fn version_string(value: TagValue) -> TagValue {
    match first_four(&value) {
        Some(parts) => TagValue::Text(
            parts.iter().map(|&b| char::from(b as u8)).collect(),
        ),
        None => value,
    }
}

/// Concatenated component names, e.g. `[1, 2, 3, 0]` to "YCbCr"
fn components_string(value: TagValue, tables: &TagTables) -> TagValue {
    match first_four(&value) {
        Some(parts) => TagValue::Text(
            parts
                .iter()
                .filter_map(|&c| u32::try_from(c).ok())
                .filter_map(|c| tables.components.get(&c))
                .map(String::as_str)
                .collect(),
        ),
        None => value,
    }
}

fn first_four(value: &TagValue) -> Option<&[i64]> {
    value.as_integers().filter(|v| v.len() >= 4).map(|v| &v[..4])
}
