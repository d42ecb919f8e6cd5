//! `inkslice`: export one svg file per layer set.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::args::SliceCli;
use crate::{
    config::SplitConfig,
    debug,
    error::SvgError,
    layer::{LayerPlan, LayerSet, discover_layers, export_layers},
    log,
    svg::Document,
    utils::{SuffixFormat, plural_count},
    warn,
};

/// Splitter settings after merging flags over the settings file.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub input: PathBuf,
    pub outdir: PathBuf,
    /// `None`, `+` or a script path.
    pub config: Option<String>,
    pub force: bool,
    pub suffix: SuffixFormat,
    pub start: i64,
    pub list_layers: bool,
}

impl SplitOptions {
    pub fn resolve(cli: &SliceCli, settings: &SplitConfig) -> Self {
        Self {
            input: cli.input.clone(),
            outdir: cli.outdir.clone(),
            config: cli.config.clone(),
            force: cli.force || settings.force,
            suffix: cli.suffix_fmt.clone().unwrap_or_else(|| settings.suffix.clone()),
            start: cli.start.unwrap_or(settings.start),
            list_layers: cli.list_layers,
        }
    }

    /// Output path for the set numbered `index`.
    fn output_path(&self, stem: &str, index: i64) -> PathBuf {
        self.outdir
            .join(format!("{stem}{}.svg", self.suffix.format(index)))
    }
}

/// What a run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SplitSummary {
    /// Exportable layers found in the input.
    pub layers: Vec<String>,
    pub exported: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Run the splitter.
///
/// Each layer set is filtered from its own copy of the parsed input. A script
/// error stops the run; files written before it are kept.
pub fn split(options: &SplitOptions) -> Result<SplitSummary> {
    if !options.input.is_file() {
        return Err(SvgError::InputNotFound(options.input.clone()).into());
    }
    if !options.outdir.is_dir() {
        return Err(SvgError::OutputDirectoryInvalid(options.outdir.clone()).into());
    }
    let source = load_document(&options.input)?;

    let layers = discover_layers(&source);
    warn!("info"; "found {}", plural_count(layers.len(), "suitable layer"));

    let mut summary = SplitSummary {
        layers,
        ..SplitSummary::default()
    };
    if options.list_layers {
        for layer in &summary.layers {
            println!("{layer}");
        }
        return Ok(summary);
    }

    let plan = LayerPlan::from_arg(options.config.as_deref())
        .context("failed to load layer script")?;
    let stem = options
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut index = options.start;
    for set in plan.sequence(&summary.layers) {
        let set = set.context("invalid layer script")?;
        let path = options.output_path(&stem, index);
        index += 1;

        if path.exists() && !options.force {
            log!("skip"; "{} exists, skipped", path.display());
            summary.skipped.push(path);
            continue;
        }
        write_set(&source, &set, &path)?;
        log!("out"; "{} exported", path.display());
        summary.exported.push(path);
    }
    Ok(summary)
}

fn load_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path).map_err(|err| SvgError::io(path, err))?;
    Document::parse(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn write_set(source: &Document, set: &LayerSet, path: &Path) -> Result<()> {
    debug!("set"; "{}: {}", path.display(), quoted(set.iter()));
    let export = export_layers(source.clone(), set);
    if !export.unmatched.is_empty() {
        warn!("warn"; "unfound layers: {}", quoted(export.unmatched.iter()));
    }
    fs::write(path, export.document.to_xml()).map_err(|err| SvgError::io(path, err))?;
    Ok(())
}

fn quoted<'a>(names: impl Iterator<Item = &'a String>) -> String {
    names
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
