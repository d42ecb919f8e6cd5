//! Inkscape layer discovery and per-set filtering.

use std::convert::Infallible;

use super::LayerSet;
use crate::svg::{
    Document, Element, NsScope,
    name::{INKSCAPE_NS, SVG_NS},
};

/// Label of an Inkscape layer group, or `None` for any other element.
fn layer_label<'a>(element: &'a Element, scope: &NsScope) -> Option<&'a str> {
    // Drawings saved without a default `xmlns` leave their groups unqualified.
    let (ns, local) = scope.element_ns(&element.name);
    if !matches!(ns, None | Some(SVG_NS)) || local != "g" {
        return None;
    }
    if element.attr_ns(scope, Some(INKSCAPE_NS), "groupmode") != Some("layer") {
        return None;
    }
    element.attr_ns(scope, Some(INKSCAPE_NS), "label")
}

/// Labels of every exportable layer, in document order.
///
/// Layers whose label starts with `_` are never offered for export.
pub fn discover_layers(doc: &Document) -> Vec<String> {
    let mut layers = Vec::new();
    doc.walk(&mut |element, scope| {
        if let Some(label) = layer_label(element, scope)
            && !label.starts_with('_')
        {
            layers.push(label.to_string());
        }
    });
    layers
}

/// Result of filtering one document down to a layer set.
#[derive(Debug)]
pub struct Export {
    pub document: Document,
    /// Requested layers that no layer group carries. Sorted.
    pub unmatched: Vec<String>,
}

/// Keep only the layers named in `layers` and make them visible.
///
/// Takes the document by value: filtering detaches subtrees, so each export
/// needs its own copy. Layers outside the set are removed with everything
/// they contain; layers in the set lose any `display:none`. Requested names
/// that match nothing are returned in [`Export::unmatched`].
pub fn export_layers(mut doc: Document, layers: &LayerSet) -> Export {
    let mut remaining = layers.clone();
    let mut detached: Vec<Vec<usize>> = Vec::new();

    // Collect first, detach after: paths stay valid during the walk.
    let Ok(()) = doc.walk_mut(&mut |path, element, scope| {
        let Some(label) = layer_label(element, scope) else {
            return Ok::<_, Infallible>(());
        };
        if layers.contains(label) {
            remaining.remove(label);
            reveal(element);
        } else {
            detached.push(path.to_vec());
        }
        Ok(())
    });

    // Deepest and last siblings first, so earlier paths keep their indices.
    detached.sort_unstable_by(|a, b| b.cmp(a));
    for path in &detached {
        doc.remove_at(path);
    }

    Export {
        document: doc,
        unmatched: remaining.into_iter().collect(),
    }
}

/// Drop `display:none` from the raw style text.
fn reveal(element: &mut Element) {
    if let Some(style) = element.attr("style")
        && style.contains("display:none")
    {
        let visible = style.replace("display:none", "");
        element.set_attr("style", visible);
    }
}
