//! Attribute rewriting over every element matching a set of tag selectors.

use super::{
    name::Selector,
    style::Style,
    tree::{Document, Element},
};
use crate::error::SvgError;

/// Replace `attribute` on every matching element that has it.
///
/// Each element is visited once, whatever number of selectors it matches.
/// Elements without the attribute are left alone. Returns how many values
/// were rewritten.
pub fn rewrite_attribute<F>(
    doc: &mut Document,
    selectors: &[Selector],
    attribute: &str,
    mut transform: F,
) -> Result<usize, SvgError>
where
    F: FnMut(&str) -> Result<String, SvgError>,
{
    let mut count = 0;
    visit_matching(doc, selectors, |element| {
        let Some(old) = element.attr(attribute) else {
            return Ok(());
        };
        let new = transform(old)?;
        if new != old {
            element.set_attr(attribute, new);
            count += 1;
        }
        Ok(())
    })?;
    Ok(count)
}

/// Rewrite one property inside the `style` attribute of matching elements.
///
/// The transform receives `None` when the property is absent and may return
/// `None` to leave it absent (or drop it), or a value to store. Styles are
/// only reformatted when the property actually changes.
pub fn rewrite_style_property<F>(
    doc: &mut Document,
    selectors: &[Selector],
    property: &str,
    mut transform: F,
) -> Result<usize, SvgError>
where
    F: FnMut(Option<&str>) -> Result<Option<String>, SvgError>,
{
    let mut count = 0;
    visit_matching(doc, selectors, |element| {
        let Some(text) = element.attr("style") else {
            return Ok(());
        };
        let mut style = Style::parse(text)?;
        let old = style.get(property).map(str::to_string);
        let new = transform(old.as_deref())?;
        if new == old {
            return Ok(());
        }
        match new {
            Some(value) => style.set(property, value),
            None => {
                style.remove(property);
            }
        }
        element.set_attr("style", style.to_string());
        count += 1;
        Ok(())
    })?;
    Ok(count)
}

/// Give matching styled elements a value for `property` when neither their
/// style nor a presentation attribute sets it. Returns how many were filled.
pub fn fill_style_default(
    doc: &mut Document,
    selectors: &[Selector],
    property: &str,
    value: &str,
) -> Result<usize, SvgError> {
    let mut count = 0;
    visit_matching(doc, selectors, |element| {
        let Some(text) = element.attr("style") else {
            return Ok(());
        };
        if element.attr(property).is_some() {
            return Ok(());
        }
        let mut style = Style::parse(text)?;
        if style.get(property).is_some() {
            return Ok(());
        }
        style.set(property, value.to_string());
        element.set_attr("style", style.to_string());
        count += 1;
        Ok(())
    })?;
    Ok(count)
}

fn visit_matching<F>(doc: &mut Document, selectors: &[Selector], mut f: F) -> Result<(), SvgError>
where
    F: FnMut(&mut Element) -> Result<(), SvgError>,
{
    doc.walk_mut(&mut |_, element, scope| {
        let (ns, local) = scope.element_ns(&element.name);
        if selectors.iter().any(|s| s.matches(ns, &local)) {
            f(element)?;
        }
        Ok(())
    })
}
