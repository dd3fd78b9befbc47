//! Thumbnail extraction command
//!
//! Writes the JPEG thumbnail embedded in the EXIF data to a file.

use std::fs;

use clap::ArgMatches;
use log::{debug, info};

use crate::api::JpegMeta;
use crate::commands::command_traits::Command;
use crate::errors::{MetadataError, MetadataResult};
use crate::jpeg::ReaderOptions;

/// Command for saving the embedded thumbnail
pub struct ThumbnailCommand {
    /// Data URI, URL or path of the image
    input: String,
    /// Path of the thumbnail file to write
    output_file: String,
}

impl ThumbnailCommand {
    /// Create a new thumbnail command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new ThumbnailCommand instance or an error
    pub fn new(args: &ArgMatches) -> MetadataResult<Self> {
        let input = args.get_one::<String>("input")
            .ok_or_else(|| MetadataError::GenericError("Missing input file".to_string()))?
            .clone();
        let output_file = args.get_one::<String>("thumbnail")
            .ok_or_else(|| MetadataError::GenericError("Missing thumbnail output file".to_string()))?
            .clone();

        debug!("Thumbnail of {} goes to {}", input, output_file);
        Ok(ThumbnailCommand { input, output_file })
    }
}

impl Command for ThumbnailCommand {
    fn execute(&self) -> MetadataResult<()> {
        let bundle = JpegMeta::new(ReaderOptions::default()).load_blocking(&self.input)?;

        let blob = bundle.thumbnail_image().ok_or_else(|| {
            MetadataError::GenericError(format!("{} has no embedded JPEG thumbnail", self.input))
        })?;

        fs::write(&self.output_file, &blob.data)?;
        info!("Wrote {} byte thumbnail to {}", blob.len(), self.output_file);
        Ok(())
    }
}
