//! Namespace resolution and tag selectors.
//!
//! Elements are matched by their resolved `(namespace, local name)` pair, so
//! `<g>` under a default svg namespace and `<svg:g>` are the same tag.

use crate::error::SvgError;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefixes accepted in tag selectors.
const WELL_KNOWN: &[(&str, &str)] = &[
    ("svg", SVG_NS),
    ("inkscape", INKSCAPE_NS),
    ("sodipodi", SODIPODI_NS),
    ("xlink", XLINK_NS),
    ("xml", XML_NS),
];

/// Split `prefix:local` into its parts. Unprefixed names get an empty prefix.
#[inline]
pub fn split_qname(qname: &str) -> (&str, &str) {
    qname.split_once(':').unwrap_or(("", qname))
}

/// A tag selector such as `svg:text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    ns: Option<&'static str>,
    local: String,
}

impl Selector {
    /// Parse a selector. The prefix must be one of the well-known ones; an
    /// unprefixed selector matches elements in no namespace.
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let (prefix, local) = split_qname(text);
        let ns = if prefix.is_empty() {
            None
        } else {
            let uri = WELL_KNOWN
                .iter()
                .find(|(p, _)| *p == prefix)
                .map(|(_, uri)| *uri)
                .ok_or_else(|| SvgError::UnknownPrefix(text.to_string()))?;
            Some(uri)
        };
        Ok(Self {
            ns,
            local: local.to_string(),
        })
    }

    /// Parse a list of selectors, failing on the first bad one.
    pub fn parse_all<S: AsRef<str>>(texts: &[S]) -> Result<Vec<Self>, SvgError> {
        texts.iter().map(|t| Self::parse(t.as_ref())).collect()
    }

    pub fn matches(&self, ns: Option<&str>, local: &str) -> bool {
        self.ns == ns && self.local == local
    }
}

/// In-scope namespace bindings during a tree walk.
///
/// The default namespace is stored under the empty prefix.
#[derive(Debug, Default)]
pub struct NsScope {
    bindings: Vec<(String, String)>,
}

impl NsScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the `xmlns` declarations of an element. Returns how many were
    /// pushed, to be handed back to [`NsScope::leave`].
    pub fn enter<'a>(&mut self, attributes: impl Iterator<Item = (&'a str, &'a str)>) -> usize {
        let before = self.bindings.len();
        for (name, value) in attributes {
            if name == "xmlns" {
                self.bindings.push((String::new(), value.to_string()));
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                self.bindings.push((prefix.to_string(), value.to_string()));
            }
        }
        self.bindings.len() - before
    }

    pub fn leave(&mut self, pushed: usize) {
        let len = self.bindings.len().saturating_sub(pushed);
        self.bindings.truncate(len);
    }

    /// Namespace bound to `prefix`, innermost declaration first.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NS);
        }
        self.bindings
            .iter()
            .rev()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
            .filter(|uri| !uri.is_empty())
    }

    /// Resolve an element name. Unprefixed elements take the default namespace.
    pub fn element_ns(&self, qname: &str) -> (Option<&str>, String) {
        let (prefix, local) = split_qname(qname);
        (self.resolve(prefix), local.to_string())
    }

    /// Resolve an attribute name. Unprefixed attributes are in no namespace.
    pub fn attribute_ns(&self, qname: &str) -> (Option<&str>, String) {
        match split_qname(qname) {
            ("", local) => (None, local.to_string()),
            (prefix, local) => (self.resolve(prefix), local.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_parse() {
        let sel = Selector::parse("svg:text").unwrap();
        assert!(sel.matches(Some(SVG_NS), "text"));
        assert!(!sel.matches(None, "text"));
        assert!(!sel.matches(Some(SVG_NS), "tspan"));

        let bare = Selector::parse("text").unwrap();
        assert!(bare.matches(None, "text"));

        assert!(matches!(
            Selector::parse("foo:text"),
            Err(SvgError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn test_scope_shadowing() {
        let mut scope = NsScope::new();
        let outer = scope.enter([("xmlns", SVG_NS), ("xmlns:i", INKSCAPE_NS)].into_iter());
        assert_eq!(outer, 2);
        assert_eq!(scope.element_ns("g"), (Some(SVG_NS), "g".to_string()));
        assert_eq!(scope.attribute_ns("label"), (None, "label".to_string()));
        assert_eq!(
            scope.attribute_ns("i:label"),
            (Some(INKSCAPE_NS), "label".to_string())
        );

        let inner = scope.enter([("xmlns", "")].into_iter());
        assert_eq!(scope.element_ns("g"), (None, "g".to_string()));
        scope.leave(inner);
        assert_eq!(scope.element_ns("g").0, Some(SVG_NS));
        scope.leave(outer);
        assert_eq!(scope.resolve("i"), None);
    }
}
