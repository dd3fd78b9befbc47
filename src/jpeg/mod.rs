//! JPEG container handling
//!
//! `segments` locates metadata regions in the marker stream and `reader`
//! drives the EXIF, IPTC and XMP decoders over them.

pub mod reader;
pub mod segments;

pub use reader::{read_metadata, read_metadata_with_xmp, MetadataBundle, MetadataReader, ReaderBuilder, ReaderOptions};
