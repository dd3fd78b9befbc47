//! Core EXIF data structures
//!
//! A decoded directory maps tag names to values. Values are a closed set
//! of shapes, one per way a TIFF entry can decode.

use std::fmt;

use indexmap::IndexMap;

/// A decoded tag value
#[derive(Debug, Clone)]
pub enum TagValue {
    /// BYTE, SHORT, LONG, SLONG or UNDEFINED with a count of one
    Integer(i64),
    /// Integer types with a count other than one
    IntegerList(Vec<i64>),
    /// RATIONAL / SRATIONAL with a count of one
    Real(f64),
    /// RATIONAL / SRATIONAL with a count other than one
    RealList(Vec<f64>),
    /// ASCII, or a value rewritten into text by post-processing
    Text(String),
    /// Embedded image data (thumbnail)
    Blob(ImageBlob),
    /// Nested directory (thumbnail IFD)
    Directory(TagDirectory),
}

impl TagValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            TagValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            TagValue::IntegerList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            TagValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_reals(&self) -> Option<&[f64]> {
        match self {
            TagValue::RealList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&ImageBlob> {
        match self {
            TagValue::Blob(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_directory(&self) -> Option<&TagDirectory> {
        match self {
            TagValue::Directory(v) => Some(v),
            _ => None,
        }
    }

    /// Short type label used in debug logs
    pub fn kind(&self) -> &'static str {
        match self {
            TagValue::Integer(_) => "integer",
            TagValue::IntegerList(_) => "integer list",
            TagValue::Real(_) => "real",
            TagValue::RealList(_) => "real list",
            TagValue::Text(_) => "text",
            TagValue::Blob(_) => "blob",
            TagValue::Directory(_) => "directory",
        }
    }
}

/// Reals compare by bit pattern so that a NaN from a zero denominator
/// equals itself.
impl PartialEq for TagValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TagValue::Integer(a), TagValue::Integer(b)) => a == b,
            (TagValue::IntegerList(a), TagValue::IntegerList(b)) => a == b,
            (TagValue::Real(a), TagValue::Real(b)) => a.to_bits() == b.to_bits(),
            (TagValue::RealList(a), TagValue::RealList(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            (TagValue::Text(a), TagValue::Text(b)) => a == b,
            (TagValue::Blob(a), TagValue::Blob(b)) => a == b,
            (TagValue::Directory(a), TagValue::Directory(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Integer(v) => write!(f, "{}", v),
            TagValue::IntegerList(v) => write!(f, "{:?}", v),
            TagValue::Real(v) => write!(f, "{}", v),
            TagValue::RealList(v) => write!(f, "{:?}", v),
            TagValue::Text(v) => write!(f, "{}", v),
            TagValue::Blob(b) => write!(f, "<{}, {} bytes>", b.mime_type, b.data.len()),
            TagValue::Directory(d) => write!(f, "<directory, {} tags>", d.len()),
        }
    }
}

/// Image bytes sliced out of the file, tagged with their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

impl ImageBlob {
    pub fn new(mime_type: &'static str, data: Vec<u8>) -> Self {
        ImageBlob { mime_type, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered mapping from tag name to decoded value
///
/// Insertion order is kept; inserting an existing name replaces the value
/// in place, the way a later entry for the same tag overrides an earlier one.
#[derive(Debug, Clone, Default)]
pub struct TagDirectory {
    entries: IndexMap<String, TagValue>,
}

impl TagDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a tag, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: TagValue) -> Option<TagValue> {
        self.entries.insert(name.into(), value)
    }

    /// Removes a tag, keeping the order of the remaining ones
    pub fn remove(&mut self, name: &str) -> Option<TagValue> {
        self.entries.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Integer value of a tag, if present with that shape
    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(TagValue::as_integer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Equal when both hold the same tags in the same order
impl PartialEq for TagDirectory {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl IntoIterator for TagDirectory {
    type Item = (String, TagValue);
    type IntoIter = indexmap::map::IntoIter<String, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for TagDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
