//! Named svg transforms applied by `inktweak`.
//!
//! The set of commands is closed: each [`Transform`] variant maps to one
//! command name and carries its own arguments.

mod color;
mod font;

pub use color::{LightnessPolicy, invert_color, invert_color_or, invert_lightness};
pub use font::resize_font;

use crate::{
    config::TweakConfig,
    debug,
    error::SvgError,
    svg::{Document, Selector, fill_style_default, rewrite_attribute, rewrite_style_property},
};

/// Properties (and presentation attributes) holding colors.
pub const COLOR_PROPERTIES: &[&str] = &["fill", "stroke", "stop-color"];

/// Tags each family of transforms applies to.
#[derive(Debug, Clone)]
pub struct Targets {
    pub font: Vec<Selector>,
    pub color: Vec<Selector>,
}

impl Targets {
    pub fn from_config(config: &TweakConfig) -> Result<Self, SvgError> {
        Ok(Self {
            font: Selector::parse_all(&config.font_tags)?,
            color: Selector::parse_all(&config.color_tags)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Multiply every `font-size` by a factor.
    ResizeFont { factor: f64 },
    /// Invert colors; `fill_default` stands in for the fill of a styled
    /// element that sets none, neither in its style nor as an attribute.
    Invert { fill_default: Option<String> },
    /// Invert lightness, keeping hue.
    InvertLight(LightnessPolicy),
}

impl Transform {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ResizeFont { .. } => "resizefont",
            Self::Invert { .. } => "invert",
            Self::InvertLight(LightnessPolicy::Midpoint) => "invertlight",
            Self::InvertLight(LightnessPolicy::Mean) => "invertlight2",
        }
    }

    /// Apply to the document. Returns how many values were rewritten.
    pub fn apply(&self, doc: &mut Document, targets: &Targets) -> Result<usize, SvgError> {
        match self {
            Self::ResizeFont { factor } => {
                rewrite_style_property(doc, &targets.font, "font-size", |value| {
                    value
                        .map(|v| traced("font-size", v, resize_font(v, *factor)))
                        .transpose()
                })
            }
            Self::Invert { fill_default } => {
                if let Some(fill) = fill_default {
                    let filled = fill_style_default(doc, &targets.color, "fill", fill)?;
                    debug!("invert"; "fill: {fill} assumed on {filled} styled elements");
                }
                recolor(doc, &targets.color, |property, value| {
                    let new = invert_color_or(value, None)?;
                    if let (Some(old), Some(new)) = (value, &new) {
                        debug!("invert"; "{property}: {old} -> {new}");
                    }
                    Ok(new)
                })
            }
            Self::InvertLight(policy) => recolor(doc, &targets.color, |property, value| {
                value
                    .map(|v| traced(property, v, invert_lightness(v, *policy)))
                    .transpose()
            }),
        }
    }
}

/// Apply `f` to every color property, in styles and as attributes.
fn recolor<F>(doc: &mut Document, selectors: &[Selector], mut f: F) -> Result<usize, SvgError>
where
    F: FnMut(&str, Option<&str>) -> Result<Option<String>, SvgError>,
{
    let mut count = 0;
    for &property in COLOR_PROPERTIES {
        count += rewrite_style_property(doc, selectors, property, |value| f(property, value))?;
        count += rewrite_attribute(doc, selectors, property, |value| {
            Ok(f(property, Some(value))?.unwrap_or_else(|| value.to_string()))
        })?;
    }
    Ok(count)
}

fn traced(
    property: &str,
    old: &str,
    new: Result<String, SvgError>,
) -> Result<String, SvgError> {
    if let Ok(new) = &new
        && new != old
    {
        debug!("tweak"; "{property}: {old} -> {new}");
    }
    new
}
