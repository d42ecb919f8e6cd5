//! Font-size scaling.

use crate::error::SvgError;
use regex::Regex;
use std::sync::LazyLock;

static PX_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"px[ \t\r\n]*$").unwrap());

/// Multiply a font size such as `12px` or `12.5` by `factor`.
///
/// The result is truncated (not rounded) to whole pixels and always carries
/// a `px` suffix.
pub fn resize_font(value: &str, factor: f64) -> Result<String, SvgError> {
    let number = PX_SUFFIX.replace(value, "");
    let size: f64 = number
        .trim()
        .parse()
        .ok()
        .filter(|size: &f64| size.is_finite())
        .ok_or_else(|| SvgError::InvalidFontSize(value.to_string()))?;

    #[allow(clippy::cast_possible_truncation)]
    let scaled = (size * factor).trunc() as i64;
    Ok(format!("{scaled}px"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_font_truncates() {
        assert_eq!(resize_font("12px", 1.5).unwrap(), "18px");
        assert_eq!(resize_font("10px", 0.35).unwrap(), "3px");
        assert_eq!(resize_font("7.9", 1.0).unwrap(), "7px");
    }

    #[test]
    fn test_resize_font_suffix_variants() {
        assert_eq!(resize_font("12px ", 2.0).unwrap(), "24px");
        assert_eq!(resize_font(" 12 px\t", 2.0).unwrap(), "24px");
        assert_eq!(resize_font("12", 2.0).unwrap(), "24px");
    }

    #[test]
    fn test_resize_font_inverse_factor() {
        for v in [1.0, 7.5, 13.0, 22.25, 100.0] {
            let once = resize_font(&format!("{v}px"), 2.0).unwrap();
            let back = resize_font(&once, 0.5).unwrap();
            let back: f64 = back.trim_end_matches("px").parse().unwrap();
            assert!((back - v).abs() <= 1.0, "{v} came back as {back}");
        }
    }

    #[test]
    fn test_resize_font_rejects_garbage() {
        let err = resize_font("12pt", 2.0).unwrap_err();
        assert!(matches!(&err, SvgError::InvalidFontSize(text) if text == "12pt"));
        assert!(resize_font("", 2.0).is_err());
        assert!(resize_font("nan", 2.0).is_err());
    }
}
