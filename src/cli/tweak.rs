//! `inktweak`: apply one named transform to an svg file.

use std::fs;

use anyhow::{Context, Result};

use super::args::TweakCommand;
use crate::{
    config::TweakConfig,
    error::SvgError,
    log,
    svg::Document,
    transform::{LightnessPolicy, Targets, Transform},
    utils::plural_count,
};

impl TweakCommand {
    pub fn transform(&self) -> Transform {
        match self {
            Self::ResizeFont { factor, .. } => Transform::ResizeFont { factor: *factor },
            Self::Invert { fill_default, .. } => Transform::Invert {
                fill_default: fill_default.clone(),
            },
            Self::InvertLight { .. } => Transform::InvertLight(LightnessPolicy::Midpoint),
            Self::InvertLight2 { .. } => Transform::InvertLight(LightnessPolicy::Mean),
        }
    }
}

/// Parse the input once, transform it, write the output once.
///
/// Returns how many values were rewritten.
pub fn tweak(command: &TweakCommand, config: &TweakConfig) -> Result<usize> {
    let io = command.io();
    let transform = command.transform();
    let targets = Targets::from_config(config).context("invalid tag list in settings")?;

    if !io.input.is_file() {
        return Err(SvgError::InputNotFound(io.input.clone()).into());
    }
    let text = fs::read_to_string(&io.input).map_err(|err| SvgError::io(&io.input, err))?;
    let mut doc = Document::parse(&text)
        .with_context(|| format!("failed to parse {}", io.input.display()))?;

    let count = transform
        .apply(&mut doc, &targets)
        .with_context(|| format!("{} failed on {}", transform.name(), io.input.display()))?;

    fs::write(&io.output, doc.to_xml()).map_err(|err| SvgError::io(&io.output, err))?;
    log!("tweak"; "{}: {} rewritten", transform.name(), plural_count(count, "value"));
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::IoArgs;
    use std::path::Path;
    use tempfile::TempDir;

    const DRAWING: &str = r##"<svg xmlns="http://www.w3.org/2000/svg">
<text style="font-size:12px;fill:#000"><tspan style="font-size:10px">hi</tspan></text>
<rect fill="white" stroke="#336699"/>
</svg>
"##;

    fn io(dir: &Path) -> IoArgs {
        let input = dir.join("in.svg");
        fs::write(&input, DRAWING).unwrap();
        IoArgs {
            input,
            output: dir.join("out.svg"),
            verbose: false,
        }
    }

    #[test]
    fn test_command_maps_to_transform() {
        let dir = TempDir::new().unwrap();
        let io = io(dir.path());
        let command = TweakCommand::InvertLight2 { io: io.clone() };
        assert_eq!(command.transform().name(), "invertlight2");
        let command = TweakCommand::ResizeFont { io, factor: 2.0 };
        assert_eq!(command.transform(), Transform::ResizeFont { factor: 2.0 });
    }

    #[test]
    fn test_resizefont_writes_output() {
        let dir = TempDir::new().unwrap();
        let command = TweakCommand::ResizeFont {
            io: io(dir.path()),
            factor: 2.0,
        };
        let count = tweak(&command, &TweakConfig::default()).unwrap();
        assert_eq!(count, 2);

        let out = fs::read_to_string(dir.path().join("out.svg")).unwrap();
        assert!(out.contains("font-size:24px;fill:#000;"));
        assert!(out.contains("font-size:20px;"));
        // Input untouched.
        assert_eq!(fs::read_to_string(dir.path().join("in.svg")).unwrap(), DRAWING);
    }

    #[test]
    fn test_invert_writes_output() {
        let dir = TempDir::new().unwrap();
        let command = TweakCommand::Invert {
            io: io(dir.path()),
            fill_default: None,
        };
        tweak(&command, &TweakConfig::default()).unwrap();
        let out = fs::read_to_string(dir.path().join("out.svg")).unwrap();
        assert!(out.contains("fill:#fff;"));
        assert!(out.contains(r##"<rect fill="black" stroke="#cc9966"/>"##));
    }

    #[test]
    fn test_font_tags_from_settings() {
        let dir = TempDir::new().unwrap();
        let command = TweakCommand::ResizeFont {
            io: io(dir.path()),
            factor: 2.0,
        };
        let config = TweakConfig {
            font_tags: vec!["svg:tspan".into()],
            ..TweakConfig::default()
        };
        assert_eq!(tweak(&command, &config).unwrap(), 1);
    }

    #[test]
    fn test_errors() {
        let dir = TempDir::new().unwrap();
        let mut args = io(dir.path());
        args.input = dir.path().join("missing.svg");
        let command = TweakCommand::InvertLight { io: args };
        let err = tweak(&command, &TweakConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SvgError>(),
            Some(SvgError::InputNotFound(_))
        ));

        let command = TweakCommand::InvertLight { io: io(dir.path()) };
        let config = TweakConfig {
            color_tags: vec!["bogus:rect".into()],
            ..TweakConfig::default()
        };
        assert!(tweak(&command, &config).is_err());
        assert!(!dir.path().join("out.svg").exists());
    }
}
