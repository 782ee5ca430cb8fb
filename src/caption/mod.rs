//! Overlay caption layout.
//!
//! The compositor that draws text onto the photo needs three things: the
//! lines to draw, the corner to anchor them to and the text colour. This
//! module builds that description from a [`MetaInfo`], applying any values
//! the user typed in over the decoded ones.
//!
//! ```text
//! Panasonic DC-G9
//! LEICA DG 12-60/F2.8-4.0
//! 1/200s  F2.8  ISO400
//! © Jane Doe
//! ```

mod format;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::exif::{MetaInfo, UNKNOWN_TEXT};

pub use format::{fraction_to_string, round_ratio_tenths, FractionStyle};

// =============================================================================
// TextPosition
// =============================================================================

/// Corner of the image the caption is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextPosition {
    #[default]
    #[serde(rename = "lb")]
    LeftBottom,
    #[serde(rename = "rb")]
    RightBottom,
    #[serde(rename = "rt")]
    RightTop,
    #[serde(rename = "lt")]
    LeftTop,
}

impl TextPosition {
    /// Short code used on the command line and in JSON output.
    pub const fn code(self) -> &'static str {
        match self {
            TextPosition::LeftBottom => "lb",
            TextPosition::RightBottom => "rb",
            TextPosition::RightTop => "rt",
            TextPosition::LeftTop => "lt",
        }
    }

    /// Whether lines should be right-aligned.
    pub const fn is_right(self) -> bool {
        matches!(self, TextPosition::RightBottom | TextPosition::RightTop)
    }

    /// Whether the block sits at the bottom edge.
    pub const fn is_bottom(self) -> bool {
        matches!(self, TextPosition::LeftBottom | TextPosition::RightBottom)
    }
}

impl FromStr for TextPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lb" | "left-bottom" => Ok(TextPosition::LeftBottom),
            "rb" | "right-bottom" => Ok(TextPosition::RightBottom),
            "rt" | "right-top" => Ok(TextPosition::RightTop),
            "lt" | "left-top" => Ok(TextPosition::LeftTop),
            other => Err(format!(
                "invalid text position '{}': expected lb, rb, rt or lt",
                other
            )),
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// TextColor
// =============================================================================

/// Caption text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextColor {
    #[default]
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

impl TextColor {
    /// Short code used on the command line and in JSON output.
    pub const fn code(self) -> &'static str {
        match self {
            TextColor::White => "w",
            TextColor::Black => "b",
        }
    }

    /// RGB value for the compositor.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            TextColor::White => [0xFF, 0xFF, 0xFF],
            TextColor::Black => [0x00, 0x00, 0x00],
        }
    }
}

impl FromStr for TextColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(TextColor::White),
            "b" | "black" => Ok(TextColor::Black),
            other => Err(format!("invalid text color '{}': expected w or b", other)),
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Options
// =============================================================================

/// User-supplied replacements for decoded values.
///
/// Each override is shown verbatim, so exposure can be given as `"1/250"`
/// and aperture as `"5.6"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    pub camera_maker: Option<String>,
    pub camera_model: Option<String>,
    pub lens_name: Option<String>,
    pub exposure_time: Option<String>,
    pub f_number: Option<String>,
    pub iso: Option<String>,
}

/// Everything besides the metadata that shapes the caption.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionOptions {
    pub position: TextPosition,
    pub color: TextColor,
    /// Photographer name appended as a credit line
    pub display_name: Option<String>,
    pub overrides: FieldOverrides,
}

// =============================================================================
// Caption
// =============================================================================

/// Text block handed to the compositor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub lines: Vec<String>,
    pub position: TextPosition,
    pub color: TextColor,
}

impl Caption {
    /// Lay out the caption for `info`.
    ///
    /// Unknown maker, model and lens values are left out instead of showing
    /// `?`. The camera line drops the maker when the model already starts
    /// with it (`"Canon Canon EOS R5"` becomes `"Canon EOS R5"`).
    pub fn build(info: &MetaInfo, options: &CaptionOptions) -> Self {
        let overrides = &options.overrides;
        let pick = |user: &Option<String>, decoded: &str| -> Option<String> {
            let value = user.as_deref().unwrap_or(decoded).trim();
            (!value.is_empty() && value != UNKNOWN_TEXT).then(|| value.to_string())
        };

        let mut lines = Vec::with_capacity(4);

        let maker = pick(&overrides.camera_maker, &info.camera_maker);
        let model = pick(&overrides.camera_model, &info.camera_model);
        let camera = match (maker, model) {
            (Some(maker), Some(model)) if model.starts_with(&maker) => Some(model),
            (Some(maker), Some(model)) => Some(format!("{} {}", maker, model)),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        };
        lines.extend(camera);
        lines.extend(pick(&overrides.lens_name, &info.lens_name));

        let exposure = overrides
            .exposure_time
            .clone()
            .unwrap_or_else(|| fraction_to_string(info.exposure_time, FractionStyle::Exposure));
        let f_number = overrides
            .f_number
            .clone()
            .unwrap_or_else(|| fraction_to_string(info.f_number, FractionStyle::Aperture));
        let iso = overrides
            .iso
            .clone()
            .unwrap_or_else(|| info.iso_speed_ratings.to_string());
        lines.push(format!("{}s  F{}  ISO{}", exposure, f_number, iso));

        if let Some(name) = options.display_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                lines.push(format!("© {}", name));
            }
        }

        Caption {
            lines,
            position: options.position,
            color: options.color,
        }
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

// =============================================================================
// Tests
// =============================================================================
