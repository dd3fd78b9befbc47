use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, LevelFilter};

use jpegmeta::utils::logger::Logger;
use jpegmeta::commands::{CommandFactory, JpegmetaCommandFactory};

fn main() {
    let matches = ClapCommand::new("jpegmeta")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Read EXIF, IPTC and XMP metadata from JPEG images")
        .arg(
            Arg::new("input")
                .help("Input JPEG: file path, http(s) URL or data URI")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("xmp")
                .short('x')
                .long("xmp")
                .help("Also extract the XMP packet")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("thumbnail")
                .short('t')
                .long("thumbnail")
                .help("Write the embedded JPEG thumbnail to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records to this file")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };

    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        }
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
        }
    }

    let factory = JpegmetaCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
