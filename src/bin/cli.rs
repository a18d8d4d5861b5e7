// src/bin/cli.rs
use clap::Parser;
use wsu_covid_tracker::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(cli::Args::parse())?;
    Ok(())
}
