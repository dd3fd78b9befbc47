//! Minimal XML document model
//!
//! Holds just what the object conversion needs: elements with their
//! attributes in document order, and text, CDATA, comment and processing
//! instruction nodes. Parsing is backed by `quick-xml` and only available
//! with the `xmp` feature.

use crate::errors::MetadataResult;
#[cfg(not(feature = "xmp"))]
use crate::errors::MetadataError;

/// An element with its attributes and child nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Qualified name, prefix included (`rdf:Description`)
    pub name: String,
    /// Attributes in document order, values unescaped
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
    Comment(String),
    /// Processing instruction, identified by its target
    ProcessingInstruction(String),
}

impl XmlNode {
    /// DOM node name: the element name, `#text`, `#cdata-section`,
    /// `#comment`, or the processing instruction target
    pub fn node_name(&self) -> &str {
        match self {
            XmlNode::Element(e) => &e.name,
            XmlNode::Text(_) => "#text",
            XmlNode::CData(_) => "#cdata-section",
            XmlNode::Comment(_) => "#comment",
            XmlNode::ProcessingInstruction(target) => target,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            XmlNode::Element(e) => e.children.iter().map(XmlNode::text_content).collect(),
            XmlNode::Text(t) | XmlNode::CData(t) => t.clone(),
            XmlNode::Comment(_) | XmlNode::ProcessingInstruction(_) => String::new(),
        }
    }
}

/// A parsed document: its top-level nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlDocument {
    pub nodes: Vec<XmlNode>,
}

impl XmlDocument {
    /// Top-level elements; a well-formed document has exactly one
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.nodes.iter().filter_map(|node| match node {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    pub fn root(&self) -> Option<&XmlElement> {
        self.elements().next()
    }

    pub fn text_content(&self) -> String {
        self.nodes.iter().map(XmlNode::text_content).collect()
    }
}

/// Parses `text` into a document
///
/// Fails with `XmlMalformed` on mismatched or unclosed tags, zero or
/// several root elements, or text outside the root element.
#[cfg(feature = "xmp")]
pub fn parse_xml(text: &str) -> MetadataResult<XmlDocument> {
    quick::parse(text)
}

/// Always fails with `XmlUnsupported`: built without the `xmp` feature
#[cfg(not(feature = "xmp"))]
pub fn parse_xml(_text: &str) -> MetadataResult<XmlDocument> {
    Err(MetadataError::XmlUnsupported)
}

#[cfg(feature = "xmp")]
mod quick {
    use log::trace;
    use quick_xml::events::{BytesStart, Event};
    use quick_xml::Reader;

    use super::{XmlDocument, XmlElement, XmlNode};
    use crate::errors::{MetadataError, MetadataResult};

    fn malformed(message: impl Into<String>) -> MetadataError {
        MetadataError::XmlMalformed(message.into())
    }

    fn utf8(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn element(start: &BytesStart) -> MetadataResult<XmlElement> {
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| malformed(e.to_string()))?;
            let value = attribute.unescape_value().map_err(|e| malformed(e.to_string()))?;
            attributes.push((utf8(attribute.key.as_ref()), value.into_owned()));
        }

        Ok(XmlElement {
            name: utf8(start.name().as_ref()),
            attributes,
            children: Vec::new(),
        })
    }

    /// Open elements plus the finished top-level nodes
    struct TreeBuilder {
        open: Vec<XmlElement>,
        document: XmlDocument,
    }

    impl TreeBuilder {
        fn push_node(&mut self, node: XmlNode) -> MetadataResult<()> {
            match self.open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    match &node {
                        XmlNode::Element(_) if self.document.root().is_some() => {
                            return Err(malformed("more than one root element"));
                        }
                        XmlNode::Text(t) if !t.trim().is_empty() => {
                            return Err(malformed(format!("text outside the root element: {:?}", t.trim())));
                        }
                        // Whitespace between top-level nodes is not kept
                        XmlNode::Text(_) => return Ok(()),
                        XmlNode::CData(_) => return Err(malformed("CDATA outside the root element")),
                        _ => {}
                    }
                    self.document.nodes.push(node);
                }
            }
            Ok(())
        }
    }

    pub(super) fn parse(text: &str) -> MetadataResult<XmlDocument> {
        let mut reader = Reader::from_str(text);
        let mut builder = TreeBuilder { open: Vec::new(), document: XmlDocument::default() };

        loop {
            let event = reader
                .read_event()
                .map_err(|e| malformed(format!("at position {}: {}", reader.buffer_position(), e)))?;

            match event {
                Event::Start(start) => {
                    let element = element(&start)?;
                    if builder.open.is_empty() && builder.document.root().is_some() {
                        return Err(malformed("more than one root element"));
                    }
                    builder.open.push(element);
                }
                Event::Empty(start) => {
                    let element = element(&start)?;
                    builder.push_node(XmlNode::Element(element))?;
                }
                Event::End(end) => {
                    let name = utf8(end.name().as_ref());
                    match builder.open.pop() {
                        Some(element) if element.name == name => {
                            builder.push_node(XmlNode::Element(element))?;
                        }
                        Some(element) => {
                            return Err(malformed(format!("expected </{}>, found </{}>", element.name, name)));
                        }
                        None => return Err(malformed(format!("unexpected </{}>", name))),
                    }
                }
                Event::Text(content) => {
                    let content = content.unescape().map_err(|e| malformed(e.to_string()))?;
                    builder.push_node(XmlNode::Text(content.into_owned()))?;
                }
                Event::CData(content) => {
                    builder.push_node(XmlNode::CData(utf8(&content)))?;
                }
                Event::Comment(content) => {
                    builder.push_node(XmlNode::Comment(utf8(&content)))?;
                }
                Event::PI(pi) => {
                    builder.push_node(XmlNode::ProcessingInstruction(utf8(pi.target())))?;
                }
                Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(element) = builder.open.last() {
            return Err(malformed(format!("unclosed element <{}>", element.name)));
        }
        if builder.document.root().is_none() {
            return Err(malformed("no root element"));
        }

        trace!("Parsed XML document with {} top-level nodes", builder.document.nodes.len());
        Ok(builder.document)
    }
}
