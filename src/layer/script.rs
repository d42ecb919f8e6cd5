//! Line-oriented layer script.
//!
//! ```text
//! background title     # base line: start from {background, title}
//! +chart               # add
//! -title               # remove (must be present)
//! *note                # add for this line only
//! ```
//!
//! Every line with at least one token yields one layer set. A line whose first
//! token carries no `+`, `-` or `*` prefix starts again from the empty set.

use std::{fs, path::Path, str::FromStr};

use crate::error::SvgError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unprefixed or `+name`.
    Add(String),
    /// `-name`.
    Remove(String),
    /// `*name`: added, then dropped once the line's set has been yielded.
    Once(String),
}

impl Token {
    fn parse(word: &str, line: usize) -> Result<Self, SvgError> {
        let name = word.strip_prefix(['+', '-', '*']).unwrap_or(word);
        if name.is_empty() {
            return Err(SvgError::ScriptSyntax {
                line,
                message: format!("`{word}` names no layer"),
            });
        }
        let name = name.to_string();
        Ok(match word.as_bytes()[0] {
            b'-' => Self::Remove(name),
            b'*' => Self::Once(name),
            _ => Self::Add(name),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the source text.
    pub number: usize,
    /// Start from the empty set before applying the tokens.
    pub reset: bool,
    pub tokens: Vec<Token>,
}

/// A parsed script. Only lines that yield a set are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
}

impl Script {
    pub fn from_path(path: &Path) -> Result<Self, SvgError> {
        fs::read_to_string(path)
            .map_err(|err| SvgError::io(path, err))?
            .parse()
    }
}

#[cfg(test)]
impl Script {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromStr for Script {
    type Err = SvgError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let number = index + 1;
            // A `#` token comments out the rest of the line.
            let words: Vec<&str> = raw
                .split_whitespace()
                .take_while(|word| !word.starts_with('#'))
                .collect();
            let Some(first) = words.first() else {
                continue;
            };
            let tokens = words
                .iter()
                .map(|word| Token::parse(word, number))
                .collect::<Result<_, _>>()?;
            lines.push(ScriptLine {
                number,
                reset: !first.starts_with(['+', '-', '*']),
                tokens,
            });
        }
        Ok(Self { lines })
    }
}
