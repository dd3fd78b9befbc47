//! Metadata reader for complete JPEG buffers
//!
//! Runs the EXIF, IPTC and (optionally) XMP extractors over one buffer
//! and collects their results in a `MetadataBundle`.

use log::{debug, info, warn};

use crate::errors::{MetadataError, MetadataResult};
use crate::io::ByteReader;
use crate::iptc::{self, IptcFieldMap, IptcValue};
use crate::jpeg::segments;
use crate::tags::{TagTables, TAG_TABLES};
use crate::tiff::constants::tag_names;
use crate::tiff::{self, ImageBlob, TagDirectory, TagValue};
use crate::xmp::{self, XmpTree};

/// Reader configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Extract the XMP packet. Off by default: it needs an XML parser and
    /// its locate step is heuristic.
    pub xmp_enabled: bool,
}

/// Everything decoded from one buffer
///
/// A section is `None` when the image does not carry it, when it could
/// not be decoded, or (for XMP) when its extraction is disabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataBundle {
    /// IFD0 tags with the Exif and GPS tags merged in, plus `thumbnail`
    pub exif_tags: Option<TagDirectory>,
    pub iptc_fields: Option<IptcFieldMap>,
    pub xmp_tree: Option<XmpTree>,
}

impl MetadataBundle {
    /// The EXIF tags, or `NoExifData` when the image has none
    pub fn all_tags(&self) -> MetadataResult<&TagDirectory> {
        self.exif_tags.as_ref().ok_or(MetadataError::NoExifData)
    }

    pub fn tag(&self, name: &str) -> Option<&TagValue> {
        self.exif_tags.as_ref()?.get(name)
    }

    /// The IFD1 directory describing the thumbnail
    pub fn thumbnail(&self) -> Option<&TagDirectory> {
        self.tag(tag_names::THUMBNAIL)?.as_directory()
    }

    /// The JPEG thumbnail bytes
    pub fn thumbnail_image(&self) -> Option<&ImageBlob> {
        self.thumbnail()?.get(tag_names::BLOB)?.as_blob()
    }

    pub fn iptc_field(&self, name: &str) -> Option<&IptcValue> {
        self.iptc_fields.as_ref()?.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.exif_tags.is_none() && self.iptc_fields.is_none() && self.xmp_tree.is_none()
    }
}

/// Builder for `MetadataReader`
#[derive(Debug, Clone, Copy)]
pub struct ReaderBuilder<'t> {
    options: ReaderOptions,
    tables: &'t TagTables,
}

impl<'t> ReaderBuilder<'t> {
    /// Enables or disables XMP extraction
    pub fn xmp(mut self, enabled: bool) -> Self {
        self.options.xmp_enabled = enabled;
        self
    }

    pub fn options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses `tables` instead of the embedded lookup tables
    pub fn tables<'u>(self, tables: &'u TagTables) -> ReaderBuilder<'u> {
        ReaderBuilder { options: self.options, tables }
    }

    pub fn build(self) -> MetadataReader<'t> {
        MetadataReader { options: self.options, tables: self.tables }
    }
}

/// Decodes metadata from complete JPEG buffers
///
/// The reader holds no per-call state; one instance can decode any number
/// of buffers, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct MetadataReader<'t> {
    options: ReaderOptions,
    tables: &'t TagTables,
}

impl MetadataReader<'static> {
    /// Reader with default options over the embedded tables
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self::builder().options(options).build()
    }

    pub fn builder() -> ReaderBuilder<'static> {
        ReaderBuilder { options: ReaderOptions::default(), tables: &TAG_TABLES }
    }
}

impl Default for MetadataReader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> MetadataReader<'t> {
    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Decodes every enabled metadata section of `data`
    ///
    /// # Returns
    /// The bundle, or an error when the buffer is not a JPEG, its TIFF
    /// header is invalid, or (with XMP enabled) the XMP packet cannot be
    /// parsed. Missing or undecodable EXIF and IPTC sections are left
    /// empty instead.
    pub fn read(&self, data: &[u8]) -> MetadataResult<MetadataBundle> {
        let reader = ByteReader::new(data);
        segments::check_soi(&reader)?;

        let bundle = MetadataBundle {
            exif_tags: self.read_exif(&reader)?,
            iptc_fields: self.read_iptc(&reader),
            xmp_tree: if self.options.xmp_enabled { xmp::extract_xmp(&reader)? } else { None },
        };

        info!(
            "Read metadata: {} EXIF tags, {} IPTC fields, XMP {}",
            bundle.exif_tags.as_ref().map_or(0, TagDirectory::len),
            bundle.iptc_fields.as_ref().map_or(0, IptcFieldMap::len),
            if bundle.xmp_tree.is_some() { "present" } else { "absent" }
        );
        Ok(bundle)
    }

    fn read_exif(&self, reader: &ByteReader) -> MetadataResult<Option<TagDirectory>> {
        let result = segments::find_exif_segment(reader)
            .and_then(|start| tiff::read_exif_data(reader, start, self.tables));

        match result {
            Ok(tags) => Ok(Some(tags)),
            Err(e) if e.is_fatal() => Err(e),
            Err(MetadataError::NoExifSegment) => {
                debug!("No EXIF segment");
                Ok(None)
            }
            Err(e) => {
                warn!("EXIF data unavailable: {}", e);
                Ok(None)
            }
        }
    }

    fn read_iptc(&self, reader: &ByteReader) -> Option<IptcFieldMap> {
        let result = segments::find_iptc_section(reader).and_then(|section| match section {
            Some(section) => iptc::read_iptc_data(reader, &section, &self.tables.iptc_fields).map(Some),
            None => Ok(None),
        });

        result.unwrap_or_else(|e| {
            warn!("IPTC data unavailable: {}", e);
            None
        })
    }
}

/// Reads EXIF and IPTC metadata from a JPEG buffer
pub fn read_metadata(data: &[u8]) -> MetadataResult<MetadataBundle> {
    MetadataReader::new().read(data)
}

/// Reads EXIF, IPTC and XMP metadata from a JPEG buffer
pub fn read_metadata_with_xmp(data: &[u8]) -> MetadataResult<MetadataBundle> {
    MetadataReader::builder().xmp(true).build().read(data)
}
