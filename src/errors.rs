//! Custom error types for metadata extraction

use std::fmt;
use std::io;

/// Metadata extraction error types
#[derive(Debug)]
pub enum MetadataError {
    /// I/O error
    IoError(io::Error),
    /// Missing SOI marker or a broken marker stream
    NotAJpeg,
    /// No APP1 segment found before the image data
    NoExifSegment,
    /// APP1 segment without the "Exif" signature, or no EXIF tags decoded
    NoExifData,
    /// Invalid TIFF header (magic number or first IFD offset)
    InvalidTiffHeader(String),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Read past the end of the buffer
    OutOfBounds {
        offset: usize,
        length: usize,
        buffer_len: usize,
    },
    /// No XML parser compiled in
    XmlUnsupported,
    /// XML parser rejected the repaired XMP packet
    XmlMalformed(String),
    /// Byte acquisition failed
    SourceUnavailable(String),
    /// Generic error with message
    GenericError(String),
}

impl MetadataError {
    /// Whether this error aborts the whole decode call
    ///
    /// A broken JPEG container or TIFF header means none of the offsets
    /// downstream can be trusted, so these surface to the caller instead
    /// of being folded into an empty section.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MetadataError::NotAJpeg
                | MetadataError::InvalidTiffHeader(_)
                | MetadataError::InvalidByteOrder(_)
        )
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataError::IoError(e) => write!(f, "I/O error: {}", e),
            MetadataError::NotAJpeg => write!(f, "Not a valid JPEG"),
            MetadataError::NoExifSegment => write!(f, "No APP1 segment found"),
            MetadataError::NoExifData => write!(f, "No EXIF data"),
            MetadataError::InvalidTiffHeader(msg) => write!(f, "Invalid TIFF header: {}", msg),
            MetadataError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            MetadataError::OutOfBounds { offset, length, buffer_len } => write!(
                f,
                "Read of {} bytes at offset {} exceeds buffer length {}",
                length, offset, buffer_len
            ),
            MetadataError::XmlUnsupported => write!(f, "XML parsing not supported in this build"),
            MetadataError::XmlMalformed(msg) => write!(f, "Malformed XMP packet: {}", msg),
            MetadataError::SourceUnavailable(msg) => write!(f, "Could not load image: {}", msg),
            MetadataError::GenericError(msg) => write!(f, "Metadata error: {}", msg),
        }
    }
}

impl std::error::Error for MetadataError {}

impl From<io::Error> for MetadataError {
    fn from(error: io::Error) -> Self {
        MetadataError::IoError(error)
    }
}

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

impl From<String> for MetadataError {
    fn from(msg: String) -> Self {
        MetadataError::GenericError(msg)
    }
}
