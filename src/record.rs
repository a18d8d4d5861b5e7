// src/record.rs
//
// One row of the case history: a date plus the four campus/population counts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four count columns, in dashboard table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    DaytonStudents,
    DaytonEmployees,
    LakeStudents,
    LakeEmployees,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::DaytonStudents,
        Metric::DaytonEmployees,
        Metric::LakeStudents,
        Metric::LakeEmployees,
    ];

    /// Dashboard table index → metric.
    pub fn from_table(index: usize) -> Option<Metric> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::DaytonStudents => "Dayton Students",
            Metric::DaytonEmployees => "Dayton Employees",
            Metric::LakeStudents => "Lake Students",
            Metric::LakeEmployees => "Lake Employees",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(with = "history_date")]
    pub date: NaiveDate,
    pub dayton_students: u32,
    pub dayton_employees: u32,
    pub lake_students: u32,
    pub lake_employees: u32,
}

impl CaseRecord {
    /// Zero counts for `date`; the parser fills metrics in as tables are read.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            dayton_students: 0,
            dayton_employees: 0,
            lake_students: 0,
            lake_employees: 0,
        }
    }

    pub fn get(&self, metric: Metric) -> u32 {
        match metric {
            Metric::DaytonStudents => self.dayton_students,
            Metric::DaytonEmployees => self.dayton_employees,
            Metric::LakeStudents => self.lake_students,
            Metric::LakeEmployees => self.lake_employees,
        }
    }

    pub fn set(&mut self, metric: Metric, value: u32) {
        let slot = match metric {
            Metric::DaytonStudents => &mut self.dayton_students,
            Metric::DaytonEmployees => &mut self.dayton_employees,
            Metric::LakeStudents => &mut self.lake_students,
            Metric::LakeEmployees => &mut self.lake_employees,
        };
        *slot = value;
    }
}

/// `DD-M-YYYY` in the CSV, `NaiveDate` in memory.
mod history_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::core::dates::{format_date, parse_stored_date};

    pub fn serialize<S: Serializer>(d: &NaiveDate, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&format_date(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_stored_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("bad date {raw:?}, expected DD-M-YYYY")))
    }
}
