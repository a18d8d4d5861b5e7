//! Scraping *spec* for the COVID-19 dashboard.
//!
//! The page carries four case tables (Dayton students, Dayton employees, Lake
//! students, Lake employees), all marked `cellpadding="1" cellspacing="1"`.
//! Each body row is `Date | Confirmed | Self-reported`, newest first, with a
//! `Totals` footer row.
//!
//! Output: one `CaseRecord` per date, ascending, where each metric is
//! confirmed + self-reported for that date's row in the matching table.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::config::consts::{TABLE_CELLPADDING, TABLE_CELLSPACING, TABLE_COUNT, TOTALS_MARKER};
use crate::core::dates::parse_dashboard_date;
use crate::core::net;
use crate::core::sanitize::{normalize_ws, strip_thousands};
use crate::error::{ParseError, TrackerError};
use crate::record::{CaseRecord, Metric};

/// GET the dashboard and parse it.
pub fn fetch(url: &str) -> Result<Vec<CaseRecord>, TrackerError> {
    let html_doc = net::http_get(url)?;
    let t = std::time::Instant::now();
    let out = parse_doc(&html_doc)?;
    debug!("Dashboard: parse in {:?}", t.elapsed());
    Ok(out)
}

/// Split out for unit tests and offline runs.
pub fn parse_doc(html_doc: &str) -> Result<Vec<CaseRecord>, ParseError> {
    let doc = Html::parse_document(html_doc);

    let table_sel = selector(&format!(
        r#"table[cellpadding="{TABLE_CELLPADDING}"][cellspacing="{TABLE_CELLSPACING}"]"#
    ))?;
    let tbody_sel = selector("tbody")?;
    let tr_sel = selector("tr")?;
    let td_sel = selector("td")?;

    let tables: Vec<ElementRef> = doc.select(&table_sel).collect();
    if tables.len() < TABLE_COUNT {
        return Err(ParseError::TableCount { expected: TABLE_COUNT, found: tables.len() });
    }
    if tables.len() > TABLE_COUNT {
        warn!(found = tables.len(), "more case tables than expected, using the first {TABLE_COUNT}");
    }

    let mut by_date: BTreeMap<NaiveDate, CaseRecord> = BTreeMap::new();

    for (t, table) in tables.iter().take(TABLE_COUNT).enumerate() {
        let metric = Metric::from_table(t).ok_or(ParseError::TableCount {
            expected: TABLE_COUNT,
            found: tables.len(),
        })?;
        let body = table
            .select(&tbody_sel)
            .next()
            .ok_or(ParseError::MissingBody { table: t })?;

        for (r, row) in body.select(&tr_sel).enumerate() {
            let cells: Vec<String> = row.select(&td_sel).map(cell_text).collect();

            // header rows are all <th>; spacer rows are all blank
            if cells.iter().all(|c| c.is_empty()) { continue; }
            if cells[0].eq_ignore_ascii_case(TOTALS_MARKER) { continue; }

            let (date_text, confirmed, self_reported) = match cells.as_slice() {
                [d, c, s, ..] if !d.is_empty() => (d, c, s),
                _ => return Err(ParseError::RowShape { table: t, row: r, cells: cells.clone() }),
            };

            let date = parse_dashboard_date(date_text)?;
            let value = cell_count(confirmed)?.saturating_add(cell_count(self_reported)?);

            by_date
                .entry(date)
                .or_insert_with(|| CaseRecord::empty(date))
                .set(metric, value);
        }
    }

    info!(dates = by_date.len(), "parsed dashboard tables");
    Ok(by_date.into_values().collect())
}

/// Validated cell → count. "1,204" is fine; anything non-numeric is an error.
pub fn parse_count(cell: &str) -> Result<u32, ParseError> {
    strip_thousands(cell)
        .parse()
        .map_err(|_| ParseError::Count(cell.to_string()))
}

/// A blank count cell counts as zero.
fn cell_count(cell: &str) -> Result<u32, ParseError> {
    if cell.is_empty() { Ok(0) } else { parse_count(cell) }
}

fn cell_text(td: ElementRef) -> String {
    normalize_ws(&td.text().collect::<String>())
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(format!("{css}: {e:?}")))
}
