pub mod errors;
pub mod io;
pub mod tags;
pub mod tiff;
pub mod jpeg;
pub mod iptc;
pub mod xmp;
pub mod utils;
pub mod commands;
pub mod api;
#[cfg(test)]
mod test_utils;

pub use crate::api::JpegMeta;

pub use errors::{MetadataError, MetadataResult};
pub use io::{acquire_bytes, Source};
pub use jpeg::{read_metadata, read_metadata_with_xmp, MetadataBundle, MetadataReader, ReaderOptions};
pub use tiff::{ImageBlob, TagDirectory, TagValue};
pub use iptc::{IptcFieldMap, IptcValue};
pub use xmp::{XmpNode, XmpTree};
