//! Command-line configuration for exif-overlay.
//!
//! This module provides the argument parser for the binary:
//! - Subcommands via clap (`inspect`, `caption`, `tags`)
//! - Environment variables with the `EXIF_OVERLAY_` prefix
//! - Defaults for every optional setting
//!
//! # Example
//!
//! ```ignore
//! use exif_overlay::config::{Cli, Command};
//!
//! let cli = Cli::parse();
//! match cli.command {
//!     Command::Inspect(config) => println!("{}", config.file.display()),
//!     _ => {}
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_OVERLAY_FORMAT` - Output format, `text` or `json` (default: text)
//! - `EXIF_OVERLAY_POSITION` - Caption corner, `lb`, `rb`, `rt` or `lt` (default: lb)
//! - `EXIF_OVERLAY_COLOR` - Caption colour, `w` or `b` (default: w)
//! - `EXIF_OVERLAY_NAME` - Photographer name for the credit line

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::caption::{CaptionOptions, FieldOverrides, TextColor, TextPosition};

// =============================================================================
// Default Values
// =============================================================================

/// Default caption corner (left-bottom).
pub const DEFAULT_POSITION: &str = "lb";

/// Default caption colour (white).
pub const DEFAULT_COLOR: &str = "w";

// =============================================================================
// CLI Arguments
// =============================================================================

/// exif-overlay - Read camera settings from JPEG files.
///
/// Decodes the Exif block of a JPEG and prints the camera, lens and exposure
/// settings, or lays them out as a caption for a photo overlay.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the decoded camera metadata.
    Inspect(InspectConfig),

    /// Print the overlay caption for a photo.
    Caption(CaptionConfig),

    /// Dump every decoded Exif entry.
    Tags(TagsConfig),
}

/// Output encoding shared by all subcommands.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

// =============================================================================
// Inspect
// =============================================================================

/// Arguments for `inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectConfig {
    /// JPEG file to read.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_OVERLAY_FORMAT")]
    pub format: OutputFormat,

    /// Fail instead of printing defaults when the file has no usable Exif block.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl InspectConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_file(&self.file)
    }
}

// =============================================================================
// Caption
// =============================================================================

/// Arguments for `caption`.
#[derive(Args, Debug, Clone)]
pub struct CaptionConfig {
    /// JPEG file to read.
    pub file: PathBuf,

    /// Corner to anchor the caption to (lb, rb, rt, lt).
    #[arg(long, default_value = DEFAULT_POSITION, env = "EXIF_OVERLAY_POSITION")]
    pub position: TextPosition,

    /// Text colour (w, b).
    #[arg(long, default_value = DEFAULT_COLOR, env = "EXIF_OVERLAY_COLOR")]
    pub color: TextColor,

    /// Photographer name shown as a credit line.
    #[arg(long, env = "EXIF_OVERLAY_NAME")]
    pub name: Option<String>,

    /// Replace the decoded camera maker.
    #[arg(long)]
    pub maker: Option<String>,

    /// Replace the decoded camera model.
    #[arg(long)]
    pub model: Option<String>,

    /// Replace the decoded lens name.
    #[arg(long)]
    pub lens: Option<String>,

    /// Replace the decoded exposure time, e.g. "1/250".
    #[arg(long)]
    pub exposure: Option<String>,

    /// Replace the decoded aperture, e.g. "5.6".
    #[arg(long)]
    pub f_number: Option<String>,

    /// Replace the decoded ISO speed.
    #[arg(long)]
    pub iso: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_OVERLAY_FORMAT")]
    pub format: OutputFormat,
}

impl CaptionConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_file(&self.file)?;

        if let Some(ref iso) = self.iso {
            if iso.trim().parse::<u32>().is_err() {
                return Err(format!("iso must be a positive integer, got '{}'", iso));
            }
        }

        let overrides = [
            ("maker", &self.maker),
            ("model", &self.model),
            ("lens", &self.lens),
            ("exposure", &self.exposure),
            ("f-number", &self.f_number),
        ];
        for (flag, value) in overrides {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(format!("--{} must not be empty", flag));
            }
        }

        Ok(())
    }

    /// Caption layout options built from the flags.
    pub fn caption_options(&self) -> CaptionOptions {
        CaptionOptions {
            position: self.position,
            color: self.color,
            display_name: self.name.clone(),
            overrides: FieldOverrides {
                camera_maker: self.maker.clone(),
                camera_model: self.model.clone(),
                lens_name: self.lens.clone(),
                exposure_time: self.exposure.clone(),
                f_number: self.f_number.clone(),
                iso: self.iso.as_deref().map(|v| v.trim().to_string()),
            },
        }
    }
}

// =============================================================================
// Tags
// =============================================================================

/// Arguments for `tags`.
#[derive(Args, Debug, Clone)]
pub struct TagsConfig {
    /// JPEG file to read.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_OVERLAY_FORMAT")]
    pub format: OutputFormat,
}

impl TagsConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_file(&self.file)
    }
}

fn validate_file(file: &std::path::Path) -> Result<(), String> {
    if file.as_os_str().is_empty() {
        return Err("an input file is required".to_string());
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
