//! Command-line interface definitions.

use crate::utils::SuffixFormat;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Split an Inkscape drawing into one svg file per layer set
#[derive(Parser, Debug, Clone)]
#[command(name = "inkslice", version, about, long_about = None, disable_version_flag = true)]
pub struct SliceCli {
    /// Input svg file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Directory receiving the exported files
    #[arg(default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub outdir: PathBuf,

    /// Layer script path, or `+` to add the layers one at a time.
    /// Without it, every layer is exported on its own.
    pub config: Option<String>,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,

    /// Numeric suffix pattern (`-%d`, `_%03d`, ...) or preset (`beamer`, `padded`)
    #[arg(short = 'S', long, value_name = "FMT")]
    pub suffix_fmt: Option<SuffixFormat>,

    /// First index used in output file names
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub start: Option<i64>,

    /// Print the exportable layers and exit
    #[arg(short, long, visible_alias = "list")]
    pub list_layers: bool,

    /// Print every exported layer set
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Settings file (default: inkslice.toml, searched upward)
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub settings: Option<PathBuf>,

    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

/// Rewrite svg attributes in place of hand edits
#[derive(Parser, Debug, Clone)]
#[command(name = "inktweak", version, about, long_about = None, arg_required_else_help = true)]
pub struct TweakCli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Settings file (default: inkslice.toml, searched upward)
    #[arg(long, global = true, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub settings: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: TweakCommand,
}

/// Available transforms
#[derive(Subcommand, Debug, Clone)]
pub enum TweakCommand {
    /// Multiply every font-size by FACTOR
    #[command(name = "resizefont")]
    ResizeFont {
        #[command(flatten)]
        io: IoArgs,

        /// Scale factor (e.g. 1.5)
        factor: f64,
    },

    /// Invert fill, stroke and stop colors
    #[command(name = "invert")]
    Invert {
        #[command(flatten)]
        io: IoArgs,

        /// Color assumed for a styled element without a fill
        #[arg(long, value_name = "COLOR")]
        fill_default: Option<String>,
    },

    /// Invert lightness around the channel midpoint, keeping hue
    #[command(name = "invertlight")]
    InvertLight {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Invert lightness around the channel mean, keeping hue
    #[command(name = "invertlight2")]
    InvertLight2 {
        #[command(flatten)]
        io: IoArgs,
    },
}

impl TweakCommand {
    pub fn io(&self) -> &IoArgs {
        match self {
            Self::ResizeFont { io, .. }
            | Self::Invert { io, .. }
            | Self::InvertLight { io }
            | Self::InvertLight2 { io } => io,
        }
    }
}

/// Input and output shared by every transform.
#[derive(clap::Args, Debug, Clone)]
pub struct IoArgs {
    /// Input svg file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output svg file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,

    /// Print every rewritten value
    #[arg(short, long)]
    pub verbose: bool,
}
