// tests/history_store.rs
//
// History file load/merge/save against real files in the temp dir.
//
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use wsu_covid_tracker::error::StoreError;
use wsu_covid_tracker::record::CaseRecord;
use wsu_covid_tracker::store::History;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("wsu_store_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn rec(day: u32, ds: u32, de: u32, ls: u32, le: u32) -> CaseRecord {
    CaseRecord {
        date: NaiveDate::from_ymd_opt(2021, 3, day).unwrap(),
        dayton_students: ds,
        dayton_employees: de,
        lake_students: ls,
        lake_employees: le,
    }
}

#[test]
fn missing_file_is_first_run() {
    let dir = tmp_dir("missing");
    let h = History::load(&dir.join("cases.csv")).unwrap();
    assert!(h.is_empty());
}

#[test]
fn first_run_writes_header_and_rows() {
    let dir = tmp_dir("first");
    let path = dir.join("cases.csv");

    let mut h = History::load(&path).unwrap();
    assert_eq!(h.merge([rec(8, 13, 0, 2, 0), rec(1, 1020, 3, 0, 0)]), 2);
    h.save(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "date,dayton_students,dayton_employees,lake_students,lake_employees\n\
         01-3-2021,1020,3,0,0\n\
         08-3-2021,13,0,2,0\n"
    );
}

#[test]
fn superset_merge_has_no_duplicates_and_stays_sorted() {
    let dir = tmp_dir("superset");
    let path = dir.join("cases.csv");
    fs::write(
        &path,
        "date,dayton_students,dayton_employees,lake_students,lake_employees\n\
         01-3-2021,1020,3,0,0\n\
         08-3-2021,13,0,2,0\n",
    )
    .unwrap();

    let mut h = History::load(&path).unwrap();
    // same dates (one with different numbers) plus one new, newest first
    let added = h.merge([rec(15, 15, 3, 1, 1), rec(8, 99, 99, 99, 99), rec(1, 1020, 3, 0, 0)]);
    assert_eq!(added, 1);
    h.save(&path).unwrap();

    let reloaded = History::load(&path).unwrap();
    let v = reloaded.to_vec();
    assert_eq!(v.len(), 3);
    assert!(v.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(v[1], rec(8, 13, 0, 2, 0)); // existing row kept as stored
    assert_eq!(v[2], rec(15, 15, 3, 1, 1));
}

#[test]
fn same_dates_again_change_nothing() {
    let dir = tmp_dir("same");
    let path = dir.join("cases.csv");
    let records = vec![rec(1, 1, 1, 1, 1), rec(8, 2, 2, 2, 2)];

    History::from_records(records.clone()).save(&path).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut h = History::load(&path).unwrap();
    assert_eq!(h.merge(records), 0);
    h.save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn zero_padded_months_are_read_back() {
    let dir = tmp_dir("padded");
    let path = dir.join("cases.csv");
    fs::write(
        &path,
        "date,dayton_students,dayton_employees,lake_students,lake_employees\n\
         05-03-2021,1,2,3,4\n",
    )
    .unwrap();
    let h = History::load(&path).unwrap();
    assert_eq!(h.to_vec(), vec![rec(5, 1, 2, 3, 4)]);
}

#[test]
fn duplicate_rows_on_disk_collapse_to_first() {
    let dir = tmp_dir("dupes");
    let path = dir.join("cases.csv");
    fs::write(
        &path,
        "date,dayton_students,dayton_employees,lake_students,lake_employees\n\
         05-3-2021,1,1,1,1\n\
         05-3-2021,9,9,9,9\n",
    )
    .unwrap();
    let h = History::load(&path).unwrap();
    assert_eq!(h.to_vec(), vec![rec(5, 1, 1, 1, 1)]);
}

#[test]
fn garbage_counts_are_an_error() {
    let dir = tmp_dir("garbage");
    let path = dir.join("cases.csv");
    fs::write(
        &path,
        "date,dayton_students,dayton_employees,lake_students,lake_employees\n\
         05-3-2021,lots,1,1,1\n",
    )
    .unwrap();
    assert!(matches!(History::load(&path), Err(StoreError::Csv { .. })));
}

#[test]
fn save_creates_parent_dirs() {
    let dir = tmp_dir("nested");
    let path = dir.join("data").join("cases.csv");
    History::from_records([rec(1, 0, 0, 0, 0)]).save(&path).unwrap();
    assert!(path.exists());
}
