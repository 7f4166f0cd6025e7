// src/bin/cli.rs
use clap::Parser;
use ygo_scrape::cli::{self, Params};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(Params::parse())?;
    Ok(())
}
