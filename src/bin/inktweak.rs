//! inktweak - rewrite font sizes and colors of an svg file.

use anyhow::Result;
use clap::Parser;
use inkslice::{
    cli::{TweakCli, tweak::tweak},
    config::ToolConfig,
    logger,
};

fn main() -> Result<()> {
    let cli = TweakCli::parse();
    logger::set_color(cli.color);
    logger::set_verbose(cli.command.io().verbose);

    let config = ToolConfig::load(cli.settings.as_deref())?;
    tweak(&cli.command, &config.tweak)?;
    Ok(())
}
