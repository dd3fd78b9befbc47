//! XMP packet extraction and conversion
//!
//! `dom` parses the packet into a small document model, `tree` converts
//! that document into a nested key/value tree, and `extractor` ties the
//! two to the JPEG scanner.

pub mod dom;
pub mod extractor;
pub mod tree;

pub use dom::{parse_xml, XmlDocument, XmlElement, XmlNode};
pub use extractor::extract_xmp;
pub use tree::{tree_to_object, XmpNode, XmpObject, XmpTree};
