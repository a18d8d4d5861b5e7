// src/store.rs
//
// The case history file: the only state that survives between runs.
//
// Merge policy is append-only keyed by date. A date already on disk is never
// rewritten by a later scrape; only dates the file has not seen are added.
// The whole file is then rewritten in ascending date order.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::ErrorKind,
    path::Path,
};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::record::CaseRecord;

pub const HEADER: [&str; 5] = [
    "date",
    "dayton_students",
    "dayton_employees",
    "lake_students",
    "lake_employees",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    by_date: BTreeMap<NaiveDate, CaseRecord>,
}

impl History {
    pub fn new() -> Self { Self::default() }

    /// Build from records; on a repeated date the first one wins.
    pub fn from_records<I: IntoIterator<Item = CaseRecord>>(records: I) -> Self {
        let mut h = Self::new();
        h.merge(records);
        h
    }

    /// Read the history file. A missing file is a first run and yields an empty history.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no history yet, starting fresh");
                return Ok(Self::new());
            }
            Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
        };

        let csv_err = |source| StoreError::Csv { path: path.to_path_buf(), source };
        let mut rdr = csv::Reader::from_reader(file);
        let mut by_date = BTreeMap::new();

        for row in rdr.deserialize::<CaseRecord>() {
            let rec = row.map_err(csv_err)?;
            if by_date.contains_key(&rec.date) {
                warn!(date = %rec.date, "duplicate date in history file, keeping the first row");
                continue;
            }
            by_date.insert(rec.date, rec);
        }

        debug!(path = %path.display(), rows = by_date.len(), "loaded history");
        Ok(Self { by_date })
    }

    /// Add the dates not already present. Returns how many were added.
    pub fn merge<I: IntoIterator<Item = CaseRecord>>(&mut self, fresh: I) -> usize {
        let mut added = 0;
        for rec in fresh {
            if self.by_date.contains_key(&rec.date) { continue; }
            self.by_date.insert(rec.date, rec);
            added += 1;
        }
        added
    }

    /// Rewrite the file: header, then one row per date ascending.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };
        let csv_err = |source| StoreError::Csv { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false) // written by hand so an empty history still gets one
            .from_path(path)
            .map_err(csv_err)?;
        wtr.write_record(HEADER).map_err(csv_err)?;
        for rec in self.by_date.values() {
            wtr.serialize(rec).map_err(csv_err)?;
        }
        wtr.flush().map_err(io_err)?;

        info!(path = %path.display(), rows = self.by_date.len(), "wrote history");
        Ok(())
    }

    /// Records in ascending date order.
    pub fn records(&self) -> impl Iterator<Item = &CaseRecord> {
        self.by_date.values()
    }

    pub fn to_vec(&self) -> Vec<CaseRecord> {
        self.by_date.values().cloned().collect()
    }

    pub fn len(&self) -> usize { self.by_date.len() }
    pub fn is_empty(&self) -> bool { self.by_date.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(d: u32, n: u32) -> CaseRecord {
        let mut r = CaseRecord::empty(NaiveDate::from_ymd_opt(2021, 3, d).unwrap());
        r.dayton_students = n;
        r
    }

    #[test]
    fn merge_skips_known_dates() {
        let mut h = History::from_records([rec(5, 1), rec(12, 2)]);
        let added = h.merge([rec(12, 99), rec(19, 3)]);
        assert_eq!(added, 1);
        let v = h.to_vec();
        assert_eq!(v.len(), 3);
        assert_eq!(v[1].dayton_students, 2); // existing row untouched
    }

    #[test]
    fn records_are_ascending_whatever_the_input_order() {
        let h = History::from_records([rec(19, 3), rec(5, 1), rec(12, 2)]);
        let days: Vec<u32> = h.records().map(|r| chrono::Datelike::day(&r.date)).collect();
        assert_eq!(days, vec![5, 12, 19]);
    }
}
