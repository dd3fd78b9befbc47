//! Metadata analysis command
//!
//! This module implements the command for decoding and displaying the
//! EXIF, IPTC and XMP metadata of a JPEG image.

use clap::ArgMatches;
use log::{debug, info};

use crate::api::JpegMeta;
use crate::commands::command_traits::Command;
use crate::errors::{MetadataError, MetadataResult};
use crate::jpeg::{MetadataBundle, ReaderOptions};
use crate::utils::format_utils;

/// Command for printing an image's metadata
pub struct AnalyzeCommand {
    /// Data URI, URL or path of the image
    input: String,
    /// Whether to extract XMP
    xmp: bool,
}

impl AnalyzeCommand {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        let input = args.get_one::<String>("input")
            .ok_or_else(|| MetadataError::GenericError("Missing input file".to_string()))?
            .clone();

        Ok(AnalyzeCommand {
            input,
            xmp: args.get_flag("xmp"),
        })
    }

    /// Display the thumbnail summary, if the image has one
    fn display_thumbnail_summary(&self, bundle: &MetadataBundle) {
        match bundle.thumbnail_image() {
            Some(blob) => info!("Embedded thumbnail: {} ({} bytes)", blob.mime_type, blob.len()),
            None => debug!("No embedded JPEG thumbnail"),
        }
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self) -> MetadataResult<()> {
        info!("Analyzing image: {}", self.input);

        let meta = JpegMeta::new(ReaderOptions { xmp_enabled: self.xmp });
        let bundle = meta.load_blocking(&self.input)?;

        println!("{}", format_utils::format_bundle(&bundle));
        self.display_thumbnail_summary(&bundle);

        debug!("Analysis completed successfully");
        Ok(())
    }
}
