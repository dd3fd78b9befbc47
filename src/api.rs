use log::info;

use crate::errors::MetadataResult;
use crate::io::{acquire_bytes, Source};
use crate::jpeg::{MetadataBundle, MetadataReader, ReaderOptions};
use crate::utils::format_utils;

/// Main interface to the jpegmeta library
///
/// Loads an image from any supported source and decodes its metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegMeta {
    reader: MetadataReader<'static>,
}

impl JpegMeta {
    /// Create a new JpegMeta instance
    ///
    /// # Arguments
    /// * `options` - Reader options (XMP extraction)
    pub fn new(options: ReaderOptions) -> Self {
        JpegMeta { reader: MetadataReader::with_options(options) }
    }

    /// Decode metadata from bytes already in memory
    pub fn decode(&self, data: &[u8]) -> MetadataResult<MetadataBundle> {
        self.reader.read(data)
    }

    /// Load an image and decode its metadata
    ///
    /// # Arguments
    /// * `input` - Data URI, http(s) URL or file path
    ///
    /// # Returns
    /// The decoded bundle, or `SourceUnavailable` if the image cannot be loaded
    pub async fn load(&self, input: &str) -> MetadataResult<MetadataBundle> {
        self.load_source(&Source::parse(input)).await
    }

    pub async fn load_source(&self, source: &Source) -> MetadataResult<MetadataBundle> {
        let data = acquire_bytes(source).await?;
        info!("Decoding metadata from {}", source.describe());
        self.decode(&data)
    }

    /// Load and decode on a private single-threaded runtime
    ///
    /// For synchronous callers such as the CLI. Must not be called from
    /// inside an async runtime.
    pub fn load_blocking(&self, input: &str) -> MetadataResult<MetadataBundle> {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(self.load(input))
    }

    /// Analyze an image and return a text report of its metadata
    ///
    /// # Arguments
    /// * `input` - Data URI, http(s) URL or file path
    ///
    /// # Returns
    /// String containing the report or an error
    pub async fn analyze(&self, input: &str) -> MetadataResult<String> {
        let bundle = self.load(input).await?;
        Ok(format_utils::format_bundle(&bundle))
    }
}
