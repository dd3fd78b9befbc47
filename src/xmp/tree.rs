//! Conversion of a parsed XML document into a nested key/value tree
//!
//! Root and nested elements are converted differently. Attributes of the
//! root element become plain string keys next to the root's own entry,
//! while nested elements keep theirs in an `@attributes` object. Both
//! shapes are relied upon by consumers of XMP trees, so they are kept.

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::xmp::dom::{XmlDocument, XmlElement, XmlNode};

/// Key that holds an element's attributes below the root
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// A converted XMP document
pub type XmpTree = XmpNode;

/// A node of the converted tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmpNode {
    Text(String),
    Object(XmpObject),
    /// Values of a name that occurred more than once, in document order
    List(Vec<XmpNode>),
}

impl XmpNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmpNode::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&XmpObject> {
        match self {
            XmpNode::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[XmpNode]> {
        match self {
            XmpNode::List(l) => Some(l),
            _ => None,
        }
    }

    /// Looks up `key` when this node is an object
    pub fn get(&self, key: &str) -> Option<&XmpNode> {
        self.as_object().and_then(|o| o.get(key))
    }
}

/// Ordered object node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmpObject {
    entries: IndexMap<String, XmpNode>,
}

impl XmpObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&XmpNode> {
        self.entries.get(key)
    }

    /// Sets `key`, replacing any previous value
    pub fn set(&mut self, key: &str, value: XmpNode) {
        self.entries.insert(key.to_string(), value);
    }

    /// Adds a value under `key`; a repeated key collects its values in a list
    pub fn append(&mut self, key: &str, value: XmpNode) {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                XmpNode::List(list) => list.push(value),
                existing => {
                    let first = std::mem::replace(existing, XmpNode::List(Vec::new()));
                    *existing = XmpNode::List(vec![first, value]);
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &XmpNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Converts a document into a tree
///
/// Each top-level element contributes its attributes as string keys and
/// its converted content under its own name. A document without elements
/// converts to its text content.
pub fn tree_to_object(document: &XmlDocument) -> XmpTree {
    if document.root().is_none() {
        return XmpNode::Text(document.text_content());
    }

    let mut object = XmpObject::new();
    for element in document.elements() {
        for (name, value) in &element.attributes {
            object.set(name, XmpNode::Text(value.clone()));
        }
        object.append(&element.name, convert_element(element));
    }

    XmpNode::Object(object)
}

fn convert_element(element: &XmlElement) -> XmpNode {
    let mut object = XmpObject::new();

    if !element.attributes.is_empty() {
        let mut attributes = XmpObject::new();
        for (name, value) in &element.attributes {
            attributes.set(name, XmpNode::Text(value.clone()));
        }
        object.set(ATTRIBUTES_KEY, XmpNode::Object(attributes));
    }

    for child in &element.children {
        object.append(child.node_name(), convert_node(child));
    }

    XmpNode::Object(object)
}

fn convert_node(node: &XmlNode) -> XmpNode {
    match node {
        XmlNode::Element(element) => convert_element(element),
        XmlNode::Text(text) => XmpNode::Text(text.clone()),
        // Node types without children or attributes convert to empty objects
        XmlNode::CData(_) | XmlNode::Comment(_) | XmlNode::ProcessingInstruction(_) => {
            XmpNode::Object(XmpObject::new())
        }
    }
}

impl fmt::Display for XmpNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmpNode::Text(t) => write!(f, "{:?}", t),
            XmpNode::Object(o) => {
                write!(f, "{{")?;
                for (i, (key, value)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            XmpNode::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
