//! Numeric suffix patterns for output file names.
//!
//! A small printf subset: exactly one `%d`, `%Nd` or `%0Nd` conversion, with
//! `%%` for a literal percent sign.
//!
//! | Preset   | Pattern  | Index 3  |
//! |----------|----------|----------|
//! | `beamer` | `-%d`    | `-3`     |
//! | `padded` | `_%03d`  | `_003`   |
//!
//! `beamer` matches what LaTeX beamer's `\multiinclude` expects
//! (`basename-N.svg`).

use crate::error::SvgError;
use serde::Deserialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct SuffixFormat {
    pattern: String,
    before: String,
    after: String,
    width: usize,
    zero_pad: bool,
}

impl SuffixFormat {
    pub fn beamer() -> Self {
        Self {
            pattern: "-%d".into(),
            before: "-".into(),
            after: String::new(),
            width: 0,
            zero_pad: false,
        }
    }

    pub fn padded() -> Self {
        Self {
            pattern: "_%03d".into(),
            before: "_".into(),
            after: String::new(),
            width: 3,
            zero_pad: true,
        }
    }

    /// Render the suffix for one index.
    pub fn format(&self, index: i64) -> String {
        let width = self.width;
        let number = if self.zero_pad {
            format!("{index:0width$}")
        } else {
            format!("{index:width$}")
        };
        format!("{}{}{}", self.before, number, self.after)
    }

    fn parse(pattern: &str) -> Result<Self, SvgError> {
        let invalid = || SvgError::InvalidSuffixFormat(pattern.to_string());
        let mut before = String::new();
        let mut after = String::new();
        let mut conversion = None;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if conversion.is_some() { &mut after } else { &mut before };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.next_if_eq(&'%').is_some() {
                out.push('%');
                continue;
            }
            if conversion.is_some() {
                return Err(invalid());
            }
            let zero_pad = chars.next_if_eq(&'0').is_some();
            let mut digits = String::new();
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            if chars.next() != Some('d') {
                return Err(invalid());
            }
            let width = if digits.is_empty() {
                0
            } else {
                digits.parse().map_err(|_| invalid())?
            };
            conversion = Some((width, zero_pad));
        }

        let (width, zero_pad) = conversion.ok_or_else(invalid)?;
        Ok(Self {
            pattern: pattern.to_string(),
            before,
            after,
            width,
            zero_pad,
        })
    }
}

impl Default for SuffixFormat {
    fn default() -> Self {
        Self::beamer()
    }
}

/// Accepts a preset name or a pattern.
impl FromStr for SuffixFormat {
    type Err = SvgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beamer" => Ok(Self::beamer()),
            "padded" => Ok(Self::padded()),
            pattern => Self::parse(pattern),
        }
    }
}

impl TryFrom<String> for SuffixFormat {
    type Error = SvgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SuffixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SuffixFormat::beamer().format(0), "-0");
        assert_eq!(SuffixFormat::beamer().format(12), "-12");
        assert_eq!("padded".parse::<SuffixFormat>().unwrap().format(1), "_001");
    }

    #[test]
    fn test_presets_match_their_patterns() {
        assert_eq!(SuffixFormat::beamer(), SuffixFormat::parse("-%d").unwrap());
        assert_eq!(SuffixFormat::padded(), SuffixFormat::parse("_%03d").unwrap());
    }

    #[test]
    fn test_patterns() {
        let fmt: SuffixFormat = ".p%2d".parse().unwrap();
        assert_eq!(fmt.format(5), ".p 5");
        let fmt: SuffixFormat = "%%%04d%%".parse().unwrap();
        assert_eq!(fmt.format(42), "%0042%");
        assert_eq!(fmt.to_string(), "%%%04d%%");
    }

    #[test]
    fn test_invalid_patterns() {
        for bad in ["", "-", "-%s", "%d%d", "%", "%0"] {
            assert!(
                matches!(
                    bad.parse::<SuffixFormat>(),
                    Err(SvgError::InvalidSuffixFormat(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }
}
