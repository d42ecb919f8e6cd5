//! Color inversion.
//!
//! Only `white`/`black` and `#rgb`/`#rrggbb` codes are touched. Everything
//! else (`none`, `url(#gradient)`, other named colors) passes through.

use crate::error::SvgError;
use regex::Regex;
use std::sync::LazyLock;

static HEX_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// How the lightness inversion picks the shift applied to every channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightnessPolicy {
    /// Shift by `255 - (min + max)`; stays in range by construction.
    Midpoint,
    /// Shift by `255 - 2 * mean`, clamped so no channel leaves `0..=255`.
    Mean,
}

/// Invert a color value.
///
/// Hex codes keep their digit width and are written in lowercase.
pub fn invert_color(value: &str) -> Result<String, SvgError> {
    match value {
        "white" => Ok("black".into()),
        "black" => Ok("white".into()),
        hex if hex.starts_with('#') => {
            check_hex(hex)?;
            // 255 - (16a + b) == 16(15 - a) + (15 - b): inverting digit by
            // digit is the channel inversion for both widths.
            let inverted: String = hex[1..]
                .chars()
                .filter_map(|c| c.to_digit(16))
                .filter_map(|d| char::from_digit(15 - d, 16))
                .collect();
            Ok(format!("#{inverted}"))
        }
        other => Ok(other.to_string()),
    }
}

/// [`invert_color`] for a possibly absent value.
///
/// An absent value is replaced by `default_for_none` (then inverted) when
/// given, and stays absent otherwise.
pub fn invert_color_or(
    value: Option<&str>,
    default_for_none: Option<&str>,
) -> Result<Option<String>, SvgError> {
    value.or(default_for_none).map(invert_color).transpose()
}

/// Invert the perceived lightness of a hex color while keeping its hue.
///
/// The same shift is added to all three channels. Non-hex values pass
/// through; the result is always a six-digit code.
pub fn invert_lightness(value: &str, policy: LightnessPolicy) -> Result<String, SvgError> {
    if !value.starts_with('#') {
        return Ok(value.to_string());
    }
    let rgb = parse_rgb(value)?;
    let min = i32::from(*rgb.iter().min().unwrap_or(&0));
    let max = i32::from(*rgb.iter().max().unwrap_or(&0));

    let [r, g, b] = match policy {
        LightnessPolicy::Midpoint => {
            let shift = 255 - (min + max);
            rgb.map(|c| (i32::from(c) + shift).clamp(0, 255))
        }
        LightnessPolicy::Mean => {
            let mean = rgb.iter().map(|&c| f64::from(c)).sum::<f64>() / 3.0;
            let shift = (255.0 - 2.0 * mean).clamp(f64::from(-min), f64::from(255 - max));
            rgb.map(|c| ((f64::from(c) + shift).round() as i32).clamp(0, 255))
        }
    };
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

fn check_hex(value: &str) -> Result<(), SvgError> {
    if HEX_CODE.is_match(value) {
        Ok(())
    } else {
        Err(SvgError::InvalidColorCode(value.to_string()))
    }
}

/// Parse `#rgb` or `#rrggbb` into channels, widening the short form.
fn parse_rgb(value: &str) -> Result<[u8; 3], SvgError> {
    check_hex(value)?;
    let digits: Vec<u8> = value[1..]
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    Ok(match digits.as_slice() {
        &[r, g, b] => [r * 17, g * 17, b * 17],
        &[r1, r2, g1, g2, b1, b2] => [r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2],
        _ => return Err(SvgError::InvalidColorCode(value.to_string())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_named() {
        assert_eq!(invert_color("white").unwrap(), "black");
        assert_eq!(invert_color("black").unwrap(), "white");
    }

    #[test]
    fn test_invert_hex_keeps_width() {
        assert_eq!(invert_color("#000000").unwrap(), "#ffffff");
        assert_eq!(invert_color("#1a2b3c").unwrap(), "#e5d4c3");
        assert_eq!(invert_color("#f80").unwrap(), "#07f");
        assert_eq!(invert_color("#FFF").unwrap(), "#000");
    }

    #[test]
    fn test_invert_is_involution() {
        for hex in ["#123456", "#abcdef", "#0f0", "#9a3", "#ffffff", "#000"] {
            assert_eq!(invert_color(&invert_color(hex).unwrap()).unwrap(), hex);
        }
    }

    #[test]
    fn test_invert_passes_other_values() {
        for value in ["url(#grad1)", "none", "red", "currentColor"] {
            assert_eq!(invert_color(value).unwrap(), value);
        }
    }

    #[test]
    fn test_invert_rejects_bad_hex() {
        for value in ["#12", "#1234", "#1234567", "#ggg"] {
            assert!(matches!(
                invert_color(value),
                Err(SvgError::InvalidColorCode(_))
            ));
        }
    }

    #[test]
    fn test_invert_color_or_default() {
        assert_eq!(invert_color_or(None, None).unwrap(), None);
        assert_eq!(
            invert_color_or(None, Some("black")).unwrap().as_deref(),
            Some("white")
        );
        assert_eq!(
            invert_color_or(Some("#fff"), Some("black")).unwrap().as_deref(),
            Some("#000")
        );
    }

    #[test]
    fn test_lightness_midpoint() {
        let inv = |v| invert_lightness(v, LightnessPolicy::Midpoint).unwrap();
        assert_eq!(inv("#ffffff"), "#000000");
        assert_eq!(inv("#000"), "#ffffff");
        // Fully saturated colors sit at mid lightness.
        assert_eq!(inv("#ff0000"), "#ff0000");
        assert_eq!(inv("#808080"), "#7f7f7f");
        assert_eq!(inv("#336699"), "#6699cc");
    }

    #[test]
    fn test_lightness_mean_clamps() {
        let inv = |v| invert_lightness(v, LightnessPolicy::Mean).unwrap();
        assert_eq!(inv("#ffffff"), "#000000");
        assert_eq!(inv("#000000"), "#ffffff");
        // Mean 85 asks for +85, but red is already at 255.
        assert_eq!(inv("#ff0000"), "#ff0000");
        assert_eq!(inv("#202020"), "#dfdfdf");
    }

    #[test]
    fn test_lightness_passes_non_hex() {
        assert_eq!(
            invert_lightness("url(#a)", LightnessPolicy::Mean).unwrap(),
            "url(#a)"
        );
        assert!(invert_lightness("#12", LightnessPolicy::Midpoint).is_err());
    }
}
