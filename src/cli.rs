// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::{consts::CONFIG_FILE, AppOptions};
use crate::error::TrackerError;
use crate::progress::PrintProgress;
use crate::runner::{self, RunFlags, RunSummary};

/// Scrape the WSU COVID-19 dashboard, update cases.csv, chart it and mail the chart.
#[derive(Parser, Debug)]
#[command(name = "wsu_covid_tracker", version, about, long_about = None)]
pub struct Args {
    /// key=value config file; missing means built-in defaults
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Parse a saved copy of the dashboard instead of fetching it
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Stop after writing the chart
    #[arg(long)]
    pub no_email: bool,
}

pub fn run(args: Args) -> Result<RunSummary, TrackerError> {
    let opts = AppOptions::load(&args.config)?;
    crate::log::init(opts.log_file.as_deref());

    let flags = RunFlags { html: args.html, skip_email: args.no_email };
    let summary = runner::run(&opts, &flags, Some(&mut PrintProgress))?;

    println!(
        "{} dates on page, {} new, {} in {}; chart {}; {} sent",
        summary.parsed,
        summary.inserted,
        summary.total,
        opts.store.history.display(),
        summary.chart.display(),
        summary.sent,
    );
    Ok(summary)
}
