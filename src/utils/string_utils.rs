//! String utility functions
//!
//! Utilities for working with strings and text data.

/// Decodes bytes as Latin-1, mapping each byte to the code point of the same value
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Finds the first occurrence of `needle` in `haystack` at or after `from`
pub fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| i + from)
}
