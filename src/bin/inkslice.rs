//! inkslice - split Inkscape layers into separate svg files.

use anyhow::Result;
use clap::Parser;
use inkslice::{
    cli::{
        SliceCli,
        split::{SplitOptions, split},
    },
    config::ToolConfig,
    logger,
};

fn main() -> Result<()> {
    let cli = SliceCli::parse();
    logger::set_color(cli.color);
    logger::set_verbose(cli.verbose);

    let config = ToolConfig::load(cli.settings.as_deref())?;
    let options = SplitOptions::resolve(&cli, &config.split);
    split(&options)?;
    Ok(())
}
