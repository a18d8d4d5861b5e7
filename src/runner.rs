// src/runner.rs
use std::path::PathBuf;

use tracing::info;

use crate::{
    chart,
    config::AppOptions,
    core::net,
    error::TrackerError,
    notify,
    progress::{NullProgress, Progress},
    specs::dashboard,
    store::History,
};

/// Per-invocation switches that are not part of the persistent config.
#[derive(Clone, Debug, Default)]
pub struct RunFlags {
    /// Parse this saved page instead of fetching the dashboard.
    pub html: Option<PathBuf>,
    /// Stop after the chart is written.
    pub skip_email: bool,
}

/// Summary of what was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Dates found on the page this run.
    pub parsed: usize,
    /// Dates the history file did not have yet.
    pub inserted: usize,
    /// Dates in the history after merging.
    pub total: usize,
    pub chart: PathBuf,
    pub sent: usize,
}

/// Fetch → parse → merge + save → chart → mail. Any failure ends the run.
pub fn run(
    opts: &AppOptions,
    flags: &RunFlags,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, TrackerError> {
    let records = match &flags.html {
        Some(path) => dashboard::parse_doc(&net::read_saved(path)?)?,
        None => dashboard::fetch(&opts.scrape.url)?,
    };
    let parsed = records.len();

    let mut history = History::load(&opts.store.history)?;
    let inserted = history.merge(records);
    history.save(&opts.store.history)?;
    info!(parsed, inserted, total = history.len(), "history updated");

    let chart = chart::render(&history.to_vec(), &opts.chart)?;

    let sent = if flags.skip_email {
        info!("mail skipped");
        0
    } else {
        let mut null = NullProgress;
        let progress = progress.unwrap_or(&mut null);
        notify::notify(&opts.mail, &chart, progress)?
    };

    Ok(RunSummary { parsed, inserted, total: history.len(), chart, sent })
}
