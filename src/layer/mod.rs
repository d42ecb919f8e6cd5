//! Inkscape layers: discovery, filtering and the sequence of layer sets
//! exported by `inkslice`.

mod filter;
mod script;
mod sequence;

pub use filter::{Export, discover_layers, export_layers};
pub use script::{Script, ScriptLine, Token};
pub use sequence::{LayerPlan, LayerSequence};

use std::collections::BTreeSet;

/// Layer labels shown together in one output file.
pub type LayerSet = BTreeSet<String>;
