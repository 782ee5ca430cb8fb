//! Display formatting for exposure time and aperture.
//!
//! Rounding is done on the exact fraction in integer arithmetic, so a value
//! sitting exactly on a half (such as 1.15) always rounds up instead of
//! depending on its binary floating point representation.

use crate::format::tiff::Fraction;

/// Placeholder for a value that cannot be displayed (zero denominator).
const UNDISPLAYABLE: &str = "?";

/// How a fraction should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FractionStyle {
    /// Exposure time: `1/200` below one second, `1.5` otherwise
    Exposure,
    /// Aperture: decimal f-number, `2.8`
    Aperture,
}

/// Round `numerator / denominator` half-up to tenths.
///
/// Returns the result in tenths (`28/10` gives `28`, `1/3` gives `3`), or
/// `None` for a zero denominator.
pub fn round_ratio_tenths(numerator: i64, denominator: i64) -> Option<i64> {
    if denominator == 0 {
        return None;
    }
    let (n, d) = if denominator < 0 {
        (-(numerator as i128), -(denominator as i128))
    } else {
        (numerator as i128, denominator as i128)
    };
    // floor(10n/d + 1/2) == floor((20n + d) / 2d)
    let tenths = (20 * n + d).div_euclid(2 * d);
    i64::try_from(tenths).ok()
}

/// Render a value given in tenths without a trailing `.0`.
fn tenths_to_string(tenths: i64) -> String {
    let sign = if tenths < 0 { "-" } else { "" };
    let abs = tenths.unsigned_abs();
    match abs % 10 {
        0 => format!("{}{}", sign, abs / 10),
        frac => format!("{}{}.{}", sign, abs / 10, frac),
    }
}

/// Format a fraction for the overlay.
///
/// Exposure times shorter than a second are written as `1/x` with `x`
/// rounded to one decimal; everything else is the decimal ratio rounded to
/// one decimal.
///
/// ```
/// use exif_overlay::caption::{fraction_to_string, FractionStyle};
/// use exif_overlay::format::tiff::Fraction;
///
/// assert_eq!(fraction_to_string(Fraction::new(1, 200), FractionStyle::Exposure), "1/200");
/// assert_eq!(fraction_to_string(Fraction::new(3, 2), FractionStyle::Exposure), "1.5");
/// assert_eq!(fraction_to_string(Fraction::new(28, 10), FractionStyle::Aperture), "2.8");
/// ```
pub fn fraction_to_string(fraction: Fraction, style: FractionStyle) -> String {
    let Fraction {
        numerator,
        denominator,
    } = fraction;

    let rendered = match style {
        FractionStyle::Exposure if numerator == 0 => Some("0".to_string()),
        FractionStyle::Exposure if numerator < denominator => {
            round_ratio_tenths(denominator, numerator).map(|t| format!("1/{}", tenths_to_string(t)))
        }
        FractionStyle::Exposure | FractionStyle::Aperture => {
            round_ratio_tenths(numerator, denominator).map(tenths_to_string)
        }
    };

    rendered.unwrap_or_else(|| UNDISPLAYABLE.to_string())
}
