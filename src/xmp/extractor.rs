//! XMP packet extraction
//!
//! The packet is found through the "http" heuristic of the JPEG scanner,
//! cut out from `<x:xmpmeta` to the end of its closing tag, given the
//! namespace declarations encoders commonly leave out, and parsed.

use log::{debug, info, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::ByteReader;
use crate::jpeg::segments::{self, XmpSection};
use crate::utils::string_utils::find_from;
use crate::xmp::dom;
use crate::xmp::tree::{tree_to_object, XmpTree};

/// Opening token of the packet root
const ROOT_TOKEN: &str = "<x:xmpmeta";

/// End of the packet root's closing tag
const ROOT_END: &str = "xmpmeta>";

/// Prefixes declared on the packet root before parsing
pub const NAMESPACE_DECLARATIONS: [(&str, &str); 11] = [
    ("Iptc4xmpCore", "http://iptc.org/std/Iptc4xmpCore/1.0/xmlns/"),
    ("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("tiff", "http://ns.adobe.com/tiff/1.0/"),
    ("plus", "http://schemas.android.com/apk/lib/com.google.android.gms.plus"),
    ("ext", "http://www.gettyimages.com/xsltExtension/1.0"),
    ("exif", "http://ns.adobe.com/exif/1.0/"),
    ("stEvt", "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"),
    ("stRef", "http://ns.adobe.com/xap/1.0/sType/ResourceRef#"),
    ("crs", "http://ns.adobe.com/camera-raw-settings/1.0/"),
    ("xapGImg", "http://ns.adobe.com/xap/1.0/g/img/"),
    ("Iptc4xmpExt", "http://iptc.org/std/Iptc4xmpExt/2008-02-29/"),
];

/// Extracts and converts the XMP packet
///
/// Candidates are tried in buffer order until one holds a complete
/// `x:xmpmeta` element.
///
/// # Returns
/// The converted tree, `None` when no candidate holds a packet,
/// `XmlMalformed` if the repaired packet does not parse, or
/// `XmlUnsupported` when built without an XML parser
pub fn extract_xmp(reader: &ByteReader) -> MetadataResult<Option<XmpTree>> {
    if !cfg!(feature = "xmp") {
        return Err(MetadataError::XmlUnsupported);
    }

    for section in segments::xmp_sections(reader) {
        let packet = match read_packet(reader, &section) {
            Some(packet) => packet,
            None => continue,
        };

        debug!("XMP packet of {} bytes at offset {}", packet.len(), section.start);
        let repaired = declare_namespaces(&packet);
        let document = dom::parse_xml(&repaired)?;

        info!("Decoded XMP packet");
        return Ok(Some(tree_to_object(&document)));
    }

    debug!("No XMP packet found");
    Ok(None)
}

/// The `x:xmpmeta` element held by `section`, if any
fn read_packet(reader: &ByteReader, section: &XmpSection) -> Option<String> {
    let text = match reader.read_string(section.start, section.length) {
        Ok(text) => text,
        Err(e) => {
            warn!("Skipping XMP candidate at {}: {}", section.start, e);
            return None;
        }
    };

    isolate_packet(&text).map(str::to_string)
}

/// Cuts `text` from the root's opening token to the end of its closing tag
///
/// The end is searched after the opening token so that an attribute-less
/// `<x:xmpmeta>` does not end the packet early.
pub fn isolate_packet(text: &str) -> Option<&str> {
    let start = text.find(ROOT_TOKEN)?;
    let end = find_from(text, ROOT_END, start + ROOT_TOKEN.len())? + ROOT_END.len();
    text.get(start..end)
}

/// Adds the missing namespace declarations right after the root token
///
/// Prefixes the root already declares are left alone, since a repeated
/// attribute is itself malformed XML.
pub fn declare_namespaces(packet: &str) -> String {
    let root_tag = packet.find('>').map_or(packet, |end| &packet[..end]);

    let declarations: String = NAMESPACE_DECLARATIONS
        .iter()
        .filter(|(prefix, _)| !root_tag.contains(&format!("xmlns:{}=", prefix)))
        .map(|(prefix, uri)| format!(" xmlns:{}=\"{}\"", prefix, uri))
        .collect();

    let insert_at = ROOT_TOKEN.len().min(packet.len());
    let mut repaired = String::with_capacity(packet.len() + declarations.len());
    repaired.push_str(&packet[..insert_at]);
    repaired.push_str(&declarations);
    repaired.push_str(&packet[insert_at..]);
    repaired
}
