//! SVG document handling.
//!
//! # Modules
//!
//! - [`tree`]: owned XML tree, parsed with quick-xml and serialized back
//! - [`name`]: namespace scopes and `prefix:local` tag selectors
//! - [`style`]: the `style` attribute codec
//! - [`rewrite`]: per-element attribute and style-property rewriting

pub mod name;
pub mod rewrite;
pub mod style;
pub mod tree;

pub use name::{NsScope, Selector};
pub use rewrite::{fill_style_default, rewrite_attribute, rewrite_style_property};
pub use style::{Style, format_style, parse_style};
pub use tree::{Document, Element, Node};
