//! Human-readable rendering of decoded metadata
//!
//! Used by the CLI and by `JpegMeta::analyze` to print a bundle as an
//! indented text report.

use crate::iptc::IptcFieldMap;
use crate::jpeg::MetadataBundle;
use crate::tiff::{TagDirectory, TagValue};
use crate::xmp::XmpNode;

const INDENT: &str = "  ";

/// Formats a single tag value
///
/// Lists are comma separated, reals are printed without trailing zeros,
/// blobs are summarized by MIME type and length.
pub fn format_tag_value(value: &TagValue) -> String {
    match value {
        TagValue::Integer(v) => v.to_string(),
        TagValue::IntegerList(v) => v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", "),
        TagValue::Real(v) => format_real(*v),
        TagValue::RealList(v) => v.iter().map(|x| format_real(*x)).collect::<Vec<_>>().join(", "),
        TagValue::Text(v) => v.clone(),
        TagValue::Blob(b) => format!("{} ({} bytes)", b.mime_type, b.len()),
        TagValue::Directory(d) => format!("{} tags", d.len()),
    }
}

fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Formats a directory one tag per line; nested directories are indented
pub fn format_directory(directory: &TagDirectory, depth: usize) -> Vec<String> {
    let prefix = INDENT.repeat(depth);
    let mut lines = Vec::new();

    for (name, value) in directory.iter() {
        match value {
            TagValue::Directory(nested) => {
                lines.push(format!("{}{}:", prefix, name));
                lines.extend(format_directory(nested, depth + 1));
            }
            _ => lines.push(format!("{}{}: {}", prefix, name, format_tag_value(value))),
        }
    }

    lines
}

pub fn format_iptc(fields: &IptcFieldMap, depth: usize) -> Vec<String> {
    let prefix = INDENT.repeat(depth);
    fields
        .iter()
        .map(|(name, value)| format!("{}{}: {}", prefix, name, value))
        .collect()
}

/// Formats an XMP tree; list items repeat their key
pub fn format_xmp(node: &XmpNode, depth: usize) -> Vec<String> {
    let mut lines = Vec::new();
    match node {
        XmpNode::Object(object) => {
            for (key, value) in object.iter() {
                format_xmp_entry(key, value, depth, &mut lines);
            }
        }
        other => format_xmp_entry("", other, depth, &mut lines),
    }
    lines
}

fn format_xmp_entry(key: &str, value: &XmpNode, depth: usize, lines: &mut Vec<String>) {
    let prefix = INDENT.repeat(depth);
    match value {
        XmpNode::Text(text) => {
            let text = text.trim();
            if !text.is_empty() {
                lines.push(format!("{}{}: {}", prefix, key, text));
            }
        }
        XmpNode::Object(object) if object.is_empty() => {}
        XmpNode::Object(_) => {
            lines.push(format!("{}{}:", prefix, key));
            lines.extend(format_xmp(value, depth + 1));
        }
        XmpNode::List(items) => {
            for item in items {
                format_xmp_entry(key, item, depth, lines);
            }
        }
    }
}

/// Formats every section of a bundle
pub fn format_bundle(bundle: &MetadataBundle) -> String {
    let mut lines = Vec::new();

    match &bundle.exif_tags {
        Some(tags) => {
            lines.push(format!("EXIF ({} tags):", tags.len()));
            lines.extend(format_directory(tags, 1));
        }
        None => lines.push("EXIF: none".to_string()),
    }

    match &bundle.iptc_fields {
        Some(fields) => {
            lines.push(format!("IPTC ({} fields):", fields.len()));
            lines.extend(format_iptc(fields, 1));
        }
        None => lines.push("IPTC: none".to_string()),
    }

    if let Some(tree) = &bundle.xmp_tree {
        lines.push("XMP:".to_string());
        lines.extend(format_xmp(tree, 1));
    }

    lines.join("\n")
}
