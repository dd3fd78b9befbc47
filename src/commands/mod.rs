//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod thumbnail_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use thumbnail_command::ThumbnailCommand;

use clap::ArgMatches;
use crate::errors::MetadataResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
#[derive(Debug, Default)]
pub struct JpegmetaCommandFactory;

impl JpegmetaCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        JpegmetaCommandFactory
    }
}

impl CommandFactory for JpegmetaCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> MetadataResult<Box<dyn Command>> {
        if args.contains_id("thumbnail") {
            Ok(Box::new(ThumbnailCommand::new(args)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args)?))
        }
    }
}
