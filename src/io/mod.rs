//! I/O utilities for buffer access and byte acquisition
//!
//! This module provides the bounds-checked buffer reader used by every
//! decoder, byte order handling, and loading image bytes from their source.

pub mod byte_order;
pub mod byte_reader;
pub mod source;

pub use byte_order::ByteOrder;
pub use byte_reader::ByteReader;
pub use source::{acquire_bytes, Source};
