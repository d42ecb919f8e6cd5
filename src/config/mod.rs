//! Optional settings file, `inkslice.toml`.
//!
//! # Example
//!
//! ```toml
//! [split]
//! suffix = "_%03d"   # or a preset: "beamer" (-%d), "padded" (_%03d)
//! start = 1
//! force = false
//!
//! [tweak]
//! font_tags = ["svg:text", "svg:tspan"]
//! color_tags = ["svg:path", "svg:rect"]
//! ```
//!
//! Command-line flags override file values, which override built-in defaults.

mod util;

pub use util::find_config_file;

use crate::{utils::suffix::SuffixFormat, warn};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Settings file searched for upward from the current directory.
pub const CONFIG_FILE: &str = "inkslice.toml";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("settings file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// Root of `inkslice.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Layer splitter defaults.
    pub split: SplitConfig,
    /// Transform tool targets.
    pub tweak: TweakConfig,
}

/// `[split]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Numeric suffix appended to the input stem.
    pub suffix: SuffixFormat,
    /// First index used in output names.
    pub start: i64,
    /// Overwrite existing output files.
    pub force: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            suffix: SuffixFormat::beamer(),
            start: 0,
            force: false,
        }
    }
}

/// `[tweak]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TweakConfig {
    /// Tags whose `font-size` is scaled by `resizefont`.
    pub font_tags: Vec<String>,
    /// Tags whose colors are inverted by the `invert*` commands.
    pub color_tags: Vec<String>,
}

impl Default for TweakConfig {
    fn default() -> Self {
        let tags = |list: &[&str]| -> Vec<String> { list.iter().map(|t| t.to_string()).collect() };
        Self {
            font_tags: tags(&["svg:text", "svg:tspan"]),
            color_tags: tags(&[
                "svg:path",
                "svg:rect",
                "svg:circle",
                "svg:ellipse",
                "svg:line",
                "svg:polyline",
                "svg:polygon",
                "svg:text",
                "svg:tspan",
                "svg:g",
                "svg:stop",
            ]),
        }
    }
}

impl ToolConfig {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `inkslice.toml` is searched
    /// upward from the current directory and defaults apply when none is found.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(Path::new(CONFIG_FILE)),
        };
        match path {
            Some(path) => Self::from_path(&path)
                .with_context(|| format!("loading settings from {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        for field in &ignored {
            warn!("settings"; "unknown field `{}` in {}, ignored", field, path.display());
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let (config, ignored) = ToolConfig::parse_with_ignored("").unwrap();
        assert!(ignored.is_empty());
        assert_eq!(config.split, SplitConfig::default());
        assert_eq!(config.split.suffix.format(3), "-3");
        assert!(config.tweak.font_tags.contains(&"svg:tspan".to_string()));
    }

    #[test]
    fn test_parse_sections() {
        let (config, _) = ToolConfig::parse_with_ignored(
            r#"
            [split]
            suffix = "padded"
            start = 1
            force = true

            [tweak]
            font_tags = ["svg:text"]
            "#,
        )
        .unwrap();
        assert_eq!(config.split.suffix.format(7), "_007");
        assert_eq!(config.split.start, 1);
        assert!(config.split.force);
        assert_eq!(config.tweak.font_tags, ["svg:text"]);
        assert_eq!(config.tweak.color_tags, TweakConfig::default().color_tags);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            ToolConfig::parse_with_ignored("[split]\nstart = 2\nbogus = 1\n").unwrap();
        assert_eq!(ignored, ["split.bogus"]);
    }

    #[test]
    fn test_bad_suffix_rejected() {
        assert!(ToolConfig::parse_with_ignored("[split]\nsuffix = \"-%s\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[split]\nstart = 5\n").unwrap();
        assert_eq!(ToolConfig::load(Some(&path)).unwrap().split.start, 5);

        let missing = dir.path().join("missing.toml");
        assert!(ToolConfig::load(Some(&missing)).is_err());
    }
}
