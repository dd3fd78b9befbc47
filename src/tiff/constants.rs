//! TIFF/EXIF format constants
//!
//! This module defines constants used throughout the EXIF processing code,
//! replacing magic numbers with descriptive names.

/// TIFF header constants
pub mod header {
    /// "Exif" signature at the start of an APP1 payload
    pub const EXIF_SIGNATURE: &[u8] = b"Exif";

    /// Distance from the APP1 payload start to the TIFF header ("Exif\0\0")
    pub const TIFF_HEADER_DISTANCE: usize = 6;

    /// Standard TIFF magic number (42)
    pub const TIFF_MAGIC: u16 = 0x002A;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: u16 = 0x4949;

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: u16 = 0x4D4D;

    /// Smallest legal offset of IFD0, right past the 8 byte header
    pub const MIN_FIRST_IFD_OFFSET: u32 = 8;
}

/// IFD layout
pub mod ifd_layout {
    /// Size of the entry count preceding the entries
    pub const ENTRY_COUNT_SIZE: usize = 2;

    /// Size of a single directory entry
    pub const ENTRY_SIZE: usize = 12;

    /// Offset of the value/offset field inside an entry
    pub const VALUE_FIELD_OFFSET: usize = 8;

    /// Bytes available for a value stored inside the entry
    pub const INLINE_VALUE_SIZE: usize = 4;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
}

/// Names of the tags the EXIF reader acts on
pub mod tag_names {
    pub const EXIF_IFD_POINTER: &str = "ExifIFDPointer";
    pub const GPS_INFO_IFD_POINTER: &str = "GPSInfoIFDPointer";
    pub const COMPRESSION: &str = "Compression";
    pub const JPEG_IF_OFFSET: &str = "JpegIFOffset";
    pub const JPEG_IF_BYTE_COUNT: &str = "JpegIFByteCount";
    pub const EXIF_VERSION: &str = "ExifVersion";
    pub const FLASHPIX_VERSION: &str = "FlashpixVersion";
    pub const COMPONENTS_CONFIGURATION: &str = "ComponentsConfiguration";
    pub const GPS_VERSION_ID: &str = "GPSVersionID";

    /// Synthetic key holding the IFD1 directory
    pub const THUMBNAIL: &str = "thumbnail";

    /// Synthetic key holding the thumbnail image bytes inside IFD1
    pub const BLOB: &str = "blob";
}

/// Compression values relevant to thumbnails
pub mod compression {
    /// JPEG compression (EXIF thumbnail)
    pub const JPEG: i64 = 6;
}

/// MIME type attached to extracted JPEG thumbnails
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
