//! Turns discovered layers, or a script, into the sequence of layer sets to
//! export. Each yielded set becomes one output file.

use std::{path::Path, vec};

use super::{
    LayerSet,
    script::{Script, ScriptLine, Token},
};
use crate::error::SvgError;

/// How layer sets are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerPlan {
    /// One file per discovered layer.
    Discrete,
    /// Discovered layers added one at a time.
    Cumulative,
    /// Driven by a layer script.
    Scripted(Script),
}

impl LayerPlan {
    /// Token selecting [`LayerPlan::Cumulative`] in place of a script path.
    pub const CUMULATIVE: &'static str = "+";

    /// Plan for the optional `CONFIG` argument: none, `+`, or a script path.
    ///
    /// A script is read and parsed in full before anything is exported.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, SvgError> {
        match arg {
            None => Ok(Self::Discrete),
            Some(Self::CUMULATIVE) => Ok(Self::Cumulative),
            Some(path) => Script::from_path(Path::new(path)).map(Self::Scripted),
        }
    }

    pub fn sequence(self, layers: &[String]) -> LayerSequence {
        let state = match self {
            Self::Discrete => State::Discrete(layers.to_vec().into_iter()),
            Self::Cumulative => State::Cumulative {
                layers: layers.to_vec().into_iter(),
                current: LayerSet::new(),
            },
            Self::Scripted(script) => State::Scripted {
                lines: script.lines.into_iter(),
                current: LayerSet::new(),
                once: Vec::new(),
            },
        };
        LayerSequence { state }
    }
}

#[derive(Debug)]
enum State {
    Discrete(vec::IntoIter<String>),
    Cumulative {
        layers: vec::IntoIter<String>,
        current: LayerSet,
    },
    Scripted {
        lines: vec::IntoIter<ScriptLine>,
        current: LayerSet,
        /// Use-once names of the line yielded last.
        once: Vec<String>,
    },
    Done,
}

/// Iterator over layer sets.
///
/// Scripted sequences stop after the first error.
#[derive(Debug)]
pub struct LayerSequence {
    state: State,
}

impl Iterator for LayerSequence {
    type Item = Result<LayerSet, SvgError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            State::Discrete(layers) => layers.next().map(|layer| Ok(LayerSet::from([layer]))),
            State::Cumulative { layers, current } => {
                let layer = layers.next()?;
                current.insert(layer);
                Some(Ok(current.clone()))
            }
            State::Scripted {
                lines,
                current,
                once,
            } => {
                // The yielded snapshot kept these; the carried set drops them.
                for name in once.drain(..) {
                    current.remove(&name);
                }
                let line = lines.next()?;
                match apply_line(current, &line) {
                    Ok(used_once) => {
                        *once = used_once;
                        Some(Ok(current.clone()))
                    }
                    Err(err) => {
                        self.state = State::Done;
                        Some(Err(err))
                    }
                }
            }
            State::Done => None,
        }
    }
}

/// Apply one script line to `current`, returning its use-once names.
fn apply_line(current: &mut LayerSet, line: &ScriptLine) -> Result<Vec<String>, SvgError> {
    if line.reset {
        current.clear();
    }
    let mut once = Vec::new();
    for token in &line.tokens {
        match token {
            Token::Add(name) => {
                current.insert(name.clone());
            }
            Token::Once(name) => {
                current.insert(name.clone());
                once.push(name.clone());
            }
            Token::Remove(name) => {
                if !current.remove(name) {
                    return Err(SvgError::LayerNotInSet {
                        line: line.number,
                        layer: name.clone(),
                    });
                }
            }
        }
    }
    Ok(once)
}

#[cfg(test)]
impl LayerSequence {
    /// Drain the whole sequence, stopping at the first error.
    pub fn collect_sets(self) -> Result<Vec<LayerSet>, SvgError> {
        self.collect()
    }

    /// Whether the sequence has already finished or failed.
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }
}
