//! IPTC-IIM field extraction
//!
//! IIM records are read from the Photoshop resource located by the JPEG
//! scanner. Field names come from the shared IPTC field table.

pub mod parser;

use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;

pub use parser::read_iptc_data;

/// A field value: one string, or every occurrence in stream order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IptcValue {
    Single(String),
    Multiple(Vec<String>),
}

impl IptcValue {
    /// The value when the field occurred once
    pub fn as_single(&self) -> Option<&str> {
        match self {
            IptcValue::Single(v) => Some(v),
            IptcValue::Multiple(_) => None,
        }
    }

    /// All values, in encounter order
    pub fn values(&self) -> Vec<&str> {
        match self {
            IptcValue::Single(v) => vec![v.as_str()],
            IptcValue::Multiple(v) => v.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            IptcValue::Single(first) => {
                let first = std::mem::take(first);
                *self = IptcValue::Multiple(vec![first, value]);
            }
            IptcValue::Multiple(list) => list.push(value),
        }
    }
}

impl fmt::Display for IptcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IptcValue::Single(v) => write!(f, "{}", v),
            IptcValue::Multiple(v) => write!(f, "[{}]", v.join(", ")),
        }
    }
}

/// Field name to value, in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IptcFieldMap {
    fields: IndexMap<String, IptcValue>,
}

impl IptcFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an occurrence of `name`
    ///
    /// The first occurrence is stored as a single string; the second turns
    /// the entry into a list and later ones are appended.
    pub fn append(&mut self, name: &str, value: String) {
        match self.fields.entry(name.to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value),
            Entry::Vacant(entry) => {
                entry.insert(IptcValue::Single(value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&IptcValue> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IptcValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
