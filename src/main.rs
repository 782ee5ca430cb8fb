//! exif-overlay - Read camera settings from JPEG files.
//!
//! This binary decodes the Exif block of a JPEG and prints the result.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_overlay::{
    config::{CaptionConfig, Cli, Command, InspectConfig, OutputFormat, TagsConfig},
    decode, fraction_to_string, read_exif, try_decode, Caption, FractionStyle, IfdEntry,
    MetaInfo,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect(config) => run_inspect(config),
        Command::Caption(config) => run_caption(config),
        Command::Tags(config) => run_tags(config),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout only carries command output.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_overlay=debug"
    } else {
        "exif_overlay=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read the whole input file.
fn read_file(path: &Path) -> Result<Vec<u8>, ExitCode> {
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), len = bytes.len(), "read input file");
            Ok(bytes)
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Inspect Command
// =============================================================================

fn run_inspect(config: InspectConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let bytes = match read_file(&config.file) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };

    let info = if config.strict {
        match try_decode(&bytes) {
            Ok(info) => info,
            Err(e) => {
                error!("No usable Exif metadata in {}: {}", config.file.display(), e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        decode(&bytes)
    };

    match config.format {
        OutputFormat::Json => print_json(&info),
        OutputFormat::Text => {
            print_meta_info(&info);
            ExitCode::SUCCESS
        }
    }
}

fn print_meta_info(info: &MetaInfo) {
    println!("Camera maker:  {}", info.camera_maker);
    println!("Camera model:  {}", info.camera_model);
    println!("Lens:          {}", info.lens_name);
    println!(
        "Exposure time: {}s ({})",
        fraction_to_string(info.exposure_time, FractionStyle::Exposure),
        info.exposure_time
    );
    println!(
        "F-number:      F{} ({})",
        fraction_to_string(info.f_number, FractionStyle::Aperture),
        info.f_number
    );
    println!("ISO:           {}", info.iso_speed_ratings);
}

// =============================================================================
// Caption Command
// =============================================================================

fn run_caption(config: CaptionConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let bytes = match read_file(&config.file) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };

    let caption = Caption::build(&decode(&bytes), &config.caption_options());

    match config.format {
        OutputFormat::Json => print_json(&caption),
        OutputFormat::Text => {
            println!("{}", caption);
            ExitCode::SUCCESS
        }
    }
}

// =============================================================================
// Tags Command
// =============================================================================

fn run_tags(config: TagsConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let bytes = match read_file(&config.file) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };

    let exif = match read_exif(&bytes) {
        Ok(exif) => exif,
        Err(e) => {
            warn!("No usable Exif block in {}: {}", config.file.display(), e);
            return match config.format {
                OutputFormat::Json => print_json(&Vec::<IfdEntry>::new()),
                OutputFormat::Text => {
                    println!("0 entries");
                    ExitCode::SUCCESS
                }
            };
        }
    };

    match config.format {
        OutputFormat::Json => print_json(&exif.entries()),
        OutputFormat::Text => {
            println!(
                "Byte order: {:?}, TIFF header at offset {}",
                exif.byte_order(),
                exif.base()
            );
            println!("{} entries", exif.entries().len());
            println!("─────────────────────────────────────────────");
            for entry in exif.entries() {
                let id = entry
                    .tag
                    .map(|t| format!("0x{:04X}", t))
                    .unwrap_or_else(|| "------".to_string());
                let name = entry.tag_name().unwrap_or("");
                println!(
                    "{:<8} {:<18} {:<15} {}",
                    id,
                    name,
                    format!("{:?}", entry.field_type),
                    entry.value
                );
            }
            ExitCode::SUCCESS
        }
    }
}
