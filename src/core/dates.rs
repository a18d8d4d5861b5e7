// src/core/dates.rs
// Dashboard dates ("March 5 – March 11, 2021") and the history file's DD-M-YYYY form.

use chrono::{Datelike, NaiveDate};

use crate::error::ParseError;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Range separators used by the dashboard (em-dash, en-dash).
const RANGE_DASHES: [char; 2] = ['\u{2014}', '\u{2013}'];

/// 1-based month number for a full English month name, case-insensitive.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.');
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Parse a dashboard date cell. For a range, the first day of the range wins.
/// The year comes from the start of the range when it carries one
/// ("December 28, 2020 – January 3, 2021"), else from the last four-digit
/// number in the cell ("March 5 – March 11, 2021").
pub fn parse_dashboard_date(text: &str) -> Result<NaiveDate, ParseError> {
    let bad = || ParseError::Date(text.to_string());

    let start = text.split(&RANGE_DASHES[..]).next().unwrap_or(text);
    let mut words = start
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty());

    let month_word = words.next().ok_or_else(bad)?;
    let month = month_number(month_word).ok_or_else(|| ParseError::UnknownMonth {
        month: month_word.to_string(),
        text: text.to_string(),
    })?;

    let day: u32 = words
        .next()
        .map(|w| w.trim_end_matches(|c: char| !c.is_ascii_digit()))
        .and_then(|w| w.parse().ok())
        .ok_or_else(bad)?;

    let year: i32 = last_year(start)
        .or_else(|| last_year(text))
        .ok_or_else(bad)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(bad)
}

fn last_year(text: &str) -> Option<i32> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| run.len() == 4)
        .last()
        .and_then(|run| run.parse().ok())
}

/// History-file form: zero-padded day, unpadded month, e.g. `05-3-2021`.
pub fn format_date(d: NaiveDate) -> String {
    format!("{:02}-{}-{}", d.day(), d.month(), d.year())
}

/// Accepts both `05-3-2021` and `05-03-2021`.
pub fn parse_stored_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().splitn(3, '-');
    let day = parts.next()?.parse().ok()?;
    let month = parts.next()?.parse().ok()?;
    let year = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
