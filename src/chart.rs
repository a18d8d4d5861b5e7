// src/chart.rs
//
// 3-day "active cases" chart: trailing rolling sums of each metric, one line each.
// Drawn with plotters into an RGB buffer, encoded to PNG with `image`.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::{debug, info, warn};

use crate::config::consts::{ROLLING_WINDOW, X_TICKS};
use crate::config::options::ChartOptions;
use crate::core::dates::format_date;
use crate::error::ChartError;
use crate::record::{CaseRecord, Metric};

const FONT_FAMILY: &str = "sans-serif";
const SERIES_COLORS: [RGBColor; 4] = [BLACK, RED, BLUE, GREEN];

/// Trailing sum over `window` samples. The first `window - 1` samples have
/// too little history and produce no output.
pub fn rolling_sum(series: &[u32], window: usize) -> Vec<u64> {
    if window == 0 { return Vec::new(); }
    series
        .windows(window)
        .map(|w| w.iter().map(|&v| u64::from(v)).sum())
        .collect()
}

/// Positions to label on the x axis: consecutive duplicate labels collapse to
/// their first occurrence, then about `target` evenly spaced positions are
/// kept, first and last included.
pub fn tick_indices(labels: &[String], target: usize) -> Vec<usize> {
    let mut distinct: Vec<usize> = Vec::with_capacity(labels.len());
    for (i, l) in labels.iter().enumerate() {
        if i == 0 || labels[i - 1] != *l {
            distinct.push(i);
        }
    }

    if target == 0 || distinct.is_empty() { return Vec::new(); }
    if target == 1 { return vec![distinct[0]]; }
    if distinct.len() <= target { return distinct; }

    let last = distinct.len() - 1;
    let mut out: Vec<usize> = (0..target)
        .map(|k| distinct[(k * last + (target - 1) / 2) / (target - 1)])
        .collect();
    out.dedup();
    out
}

/// The smoothed series for one metric, aligned with `history[ROLLING_WINDOW - 1..]`.
pub fn active_series(history: &[CaseRecord], metric: Metric) -> Vec<u64> {
    let raw: Vec<u32> = history.iter().map(|r| r.get(metric)).collect();
    rolling_sum(&raw, ROLLING_WINDOW)
}

/// Render the chart for `history` (ascending) to `opts.path`, overwriting it.
pub fn render(history: &[CaseRecord], opts: &ChartOptions) -> Result<PathBuf, ChartError> {
    load_font(&opts.fonts)?;

    let skip = ROLLING_WINDOW.saturating_sub(1).min(history.len());
    let labels: Vec<String> = history[skip..].iter().map(|r| format_date(r.date)).collect();
    let series: Vec<(Metric, Vec<u64>)> = Metric::ALL
        .into_iter()
        .map(|m| (m, active_series(history, m)))
        .collect();

    if labels.is_empty() {
        warn!(records = history.len(), "not enough history for a {ROLLING_WINDOW}-day window, chart will be empty");
    }

    let ticks = tick_indices(&labels, X_TICKS);
    let y_max = series
        .iter()
        .flat_map(|(_, s)| s.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    let (w, h) = (opts.width, opts.height);
    let mut buf = vec![0u8; (w as usize) * (h as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let x_end = labels.len().max(2) - 1;
        let mut chart = ChartBuilder::on(&root)
            .caption(&opts.title, (FONT_FAMILY, 20))
            .margin(12)
            .margin_right(36)
            .x_label_area_size(36)
            .y_label_area_size(48)
            .build_cartesian_2d(0..x_end, 0u64..(y_max + y_max / 10 + 1))
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len().max(1))
            .x_label_formatter(&|i| {
                if ticks.contains(i) {
                    labels.get(*i).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .label_style((FONT_FAMILY, 12))
            .draw()
            .map_err(draw_err)?;

        for ((metric, values), color) in series.iter().zip(SERIES_COLORS) {
            chart
                .draw_series(LineSeries::new(
                    values.iter().enumerate().map(|(i, &v)| (i, v)),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(metric.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, 12))
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    write_png(&opts.path, buf, w, h)?;
    info!(path = %opts.path.display(), points = labels.len(), "rendered chart");
    Ok(opts.path.clone())
}

fn write_png(path: &Path, buf: Vec<u8>, w: u32, h: u32) -> Result<(), ChartError> {
    let img = image::RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| ChartError::Draw(format!("buffer does not fit {w}x{h}")))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ChartError::Write { path: path.to_path_buf(), source })
}

/// Register the first readable candidate as the chart font.
/// plotters keeps the bytes for the life of the process, hence the leak.
fn load_font(candidates: &[PathBuf]) -> Result<(), ChartError> {
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else { continue };
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!(font = %path.display(), "chart font");
                return Ok(());
            }
            Err(_) => warn!(font = %path.display(), "not a usable font, trying next"),
        }
    }
    Err(ChartError::NoFont(candidates.to_vec()))
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}
