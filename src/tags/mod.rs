//! Tag name and value lookup tables
//!
//! The tables are immutable data parsed once from the embedded
//! `exif_tags.toml` and shared by reference with every decoder.

use std::collections::HashMap;
use lazy_static::lazy_static;
use log::error;

use crate::errors::{MetadataError, MetadataResult};

/// Tag code to tag name
pub type TagNameTable = HashMap<u16, String>;

/// Raw value to human-readable string
pub type ValueStringTable = HashMap<u32, String>;

lazy_static! {
    // Parse the embedded table document at first use
    pub static ref TAG_TABLES: TagTables = {
        let content = include_str!("../../exif_tags.toml");
        TagTables::from_str(content).unwrap_or_else(|e| {
            error!("Failed to parse tag tables: {}", e);
            TagTables::default()
        })
    };
}

/// Container for all lookup tables
#[derive(Debug, Default)]
pub struct TagTables {
    /// IFD0 (TIFF) tag names
    pub tiff: TagNameTable,
    /// Exif sub-IFD tag names
    pub exif: TagNameTable,
    /// GPS sub-IFD tag names
    pub gps: TagNameTable,
    /// IFD1 (thumbnail) tag names
    pub ifd1: TagNameTable,
    /// IPTC dataset number to field name
    pub iptc_fields: HashMap<u8, String>,
    /// Per-tag value strings, keyed by tag name
    pub string_values: HashMap<String, ValueStringTable>,
    /// Component names for ComponentsConfiguration
    pub components: ValueStringTable,
}

impl TagTables {
    /// Parse tables from a TOML string
    pub fn from_str(content: &str) -> MetadataResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(MetadataError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut tables = TagTables::default();

        Self::parse_code_table(&toml_value, "tiff_tags", &mut tables.tiff);
        Self::parse_code_table(&toml_value, "exif_tags", &mut tables.exif);
        Self::parse_code_table(&toml_value, "gps_tags", &mut tables.gps);
        Self::parse_code_table(&toml_value, "ifd1_tags", &mut tables.ifd1);
        Self::parse_code_table(&toml_value, "iptc_fields", &mut tables.iptc_fields);
        Self::parse_code_table(&toml_value, "components", &mut tables.components);

        if let Some(groups) = toml_value.get("string_values").and_then(|v| v.as_table()) {
            for (tag_name, group) in groups {
                let mut values = ValueStringTable::new();
                if let Some(table) = group.as_table() {
                    Self::fill_table(table, &mut values);
                }
                tables.string_values.insert(tag_name.clone(), values);
            }
        }

        Ok(tables)
    }

    /// Helper to parse code tables from TOML
    fn parse_code_table<K>(toml_value: &toml::Value, table_name: &str, target: &mut HashMap<K, String>)
    where
        K: TryFrom<u32> + std::hash::Hash + Eq,
    {
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            Self::fill_table(table, target);
        }
    }

    fn fill_table<K>(table: &toml::map::Map<String, toml::Value>, target: &mut HashMap<K, String>)
    where
        K: TryFrom<u32> + std::hash::Hash + Eq,
    {
        for (k, v) in table {
            let code = parse_code(k).and_then(|c| K::try_from(c).ok());
            match (code, v.as_str()) {
                (Some(code), Some(name)) => {
                    target.insert(code, name.to_string());
                }
                _ => error!("Skipping malformed table entry {} = {}", k, v),
            }
        }
    }

    /// Value strings for a tag, if the tag has any
    pub fn value_strings(&self, tag_name: &str) -> Option<&ValueStringTable> {
        self.string_values.get(tag_name)
    }
}

/// Parses a table key written either as `0x`-prefixed hex or decimal
fn parse_code(key: &str) -> Option<u32> {
    match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => key.parse::<u32>().ok(),
    }
}
