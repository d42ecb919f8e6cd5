//! The `style` attribute micro-format: `key:value;key:value;`.

use crate::error::SvgError;
use std::fmt;

/// Ordered property list parsed from a `style` attribute.
///
/// Insertion order is kept so that reformatting an untouched style yields the
/// same declarations in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    props: Vec<(String, String)>,
}

impl Style {
    /// Parse a style string.
    ///
    /// Segments are split on `;` and each non-empty one on its first `:`.
    /// Surrounding whitespace of keys and values is trimmed.
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let mut props = Vec::new();
        for segment in text.split(';') {
            if segment.trim().is_empty() {
                continue;
            }
            let (key, value) = segment
                .split_once(':')
                .ok_or_else(|| SvgError::MalformedStyle {
                    segment: segment.to_string(),
                })?;
            props.push((key.trim().to_string(), value.trim().to_string()));
        }
        Ok(Self { props })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, keeping its position if it already exists.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.props.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.props.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.props.iter().position(|(k, _)| k == key)?;
        Some(self.props.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Formats as `key:value;` per property. An empty style formats as `""`.
impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.props {
            write!(f, "{key}:{value};")?;
        }
        Ok(())
    }
}

/// Parse a style string into an ordered property list.
#[inline]
pub fn parse_style(text: &str) -> Result<Style, SvgError> {
    Style::parse(text)
}

/// Format a property list back into a style string.
#[inline]
pub fn format_style(style: &Style) -> String {
    style.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let style = parse_style("fill:#ff0000;font-size:12px;stroke:none;").unwrap();
        let keys: Vec<_> = style.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["fill", "font-size", "stroke"]);
        assert_eq!(style.get("font-size"), Some("12px"));
    }

    #[test]
    fn test_parse_without_trailing_separator() {
        let style = parse_style("opacity:1").unwrap();
        assert_eq!(format_style(&style), "opacity:1;");
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let style = parse_style("fill:url(#a:b)").unwrap();
        assert_eq!(style.get("fill"), Some("url(#a:b)"));
    }

    #[test]
    fn test_malformed_segment() {
        let err = parse_style("fill:red;oops;").unwrap_err();
        assert!(matches!(err, SvgError::MalformedStyle { segment } if segment == "oops"));
    }

    #[test]
    fn test_empty_style_formats_empty() {
        assert_eq!(format_style(&parse_style("").unwrap()), "");
        assert_eq!(format_style(&parse_style(";").unwrap()), "");
    }

    #[test]
    fn test_set_and_remove() {
        let mut style = parse_style("a:1;b:2;").unwrap();
        style.set("a", "3");
        style.set("c", "4");
        assert_eq!(style.remove("b").as_deref(), Some("2"));
        assert_eq!(format_style(&style), "a:3;c:4;");
    }
}
