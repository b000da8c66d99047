//! Core data types for sleep records
//!
//! - `SleepRecord`: one night of sleep as read from the CSV export
//! - `RowIssue`: a CSV row that was rejected or flagged during loading
//! - `LoadReport`: the records of a single load plus its diagnostics

use serde::{Deserialize, Serialize};

/// Hours in a day; the stacked sleep + awake bar always sums to this.
pub const HOURS_PER_DAY: f64 = 24.0;

/// A single day's sleep measurement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepRecord {
    /// Date label exactly as it appears in the CSV
    pub date: String,
    /// Hours slept
    pub sleep_time: f64,
    /// Hours awake, always `HOURS_PER_DAY - sleep_time`
    pub awake_time: f64,
}

impl SleepRecord {
    /// Create a record, deriving awake time from the sleep hours.
    ///
    /// No clamping is applied: a sleep value above 24 yields a negative
    /// awake time.
    pub fn new(date: impl Into<String>, sleep_time: f64) -> Self {
        Self {
            date: date.into(),
            sleep_time,
            awake_time: HOURS_PER_DAY - sleep_time,
        }
    }

    /// Whether the sleep hours fall inside a single day
    pub fn is_within_day(&self) -> bool {
        (0.0..=HOURS_PER_DAY).contains(&self.sleep_time)
    }
}

/// Arithmetic mean of `sleep_time`, or `None` for an empty slice
pub fn average_sleep_time(records: &[SleepRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }

    let total: f64 = records.iter().map(|r| r.sleep_time).sum();
    Some(total / records.len() as f64)
}

/// A CSV row that did not load cleanly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowIssue {
    /// 1-based line number in the source file
    pub line: usize,
    /// Date field of the row (may be empty)
    pub date: String,
    /// Human-readable description of the problem
    pub reason: String,
}

impl RowIssue {
    pub fn new(line: usize, date: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            line,
            date: date.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of loading a sleep CSV
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LoadReport {
    /// Records in file order
    pub records: Vec<SleepRecord>,
    /// Non-blank data rows seen (header excluded)
    pub rows_read: usize,
    /// Rows dropped because the sleep value was missing or not a number
    pub rejected: Vec<RowIssue>,
    /// Rows kept whose sleep hours fall outside 0..=24
    pub flagged: Vec<RowIssue>,
}

impl LoadReport {
    /// Mean sleep time over the loaded records
    pub fn average(&self) -> Option<f64> {
        average_sleep_time(&self.records)
    }

    /// True when every data row produced an in-range record
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.flagged.is_empty()
    }
}
