//! Error types shared by both tools.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while loading, transforming or exporting svg files.
///
/// Requested layers that are missing from a document are not errors: they
/// are returned by [`crate::layer::export_layers`] and reported as warnings.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("can't find `{0}`")]
    InputNotFound(PathBuf),

    #[error("`{0}` does not seem to be a directory")]
    OutputDirectoryInvalid(PathBuf),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("XML parse error at position {position}: {message}")]
    XmlParse { position: u64, message: String },

    #[error("malformed style declaration {segment:?} (expected `key:value`)")]
    MalformedStyle { segment: String },

    #[error("wrong font-size specification: {0:?}")]
    InvalidFontSize(String),

    #[error("invalid color code {0:?} (expected 3 or 6 hex digits)")]
    InvalidColorCode(String),

    #[error("line {line}: can't remove layer {layer:?}, it is not in the current set")]
    LayerNotInSet { line: usize, layer: String },

    #[error("line {line}: {message}")]
    ScriptSyntax { line: usize, message: String },

    #[error("unknown namespace prefix in tag selector {0:?}")]
    UnknownPrefix(String),

    #[error("invalid suffix format {0:?} (expected exactly one `%d`-style conversion)")]
    InvalidSuffixFormat(String),
}

impl SvgError {
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display_carries_context() {
        let err = SvgError::io("a.svg", Error::new(ErrorKind::NotFound, "gone"));
        assert!(err.to_string().contains("a.svg"));

        let err = SvgError::InvalidFontSize("12pt".into());
        assert!(err.to_string().contains("\"12pt\""));

        let err = SvgError::LayerNotInSet {
            line: 3,
            layer: "title".into(),
        };
        let display = err.to_string();
        assert!(display.contains("line 3"));
        assert!(display.contains("title"));
    }
}
