//! Garmin Connect Extraction
//!
//! Pulls nightly sleep summaries from Garmin Connect and writes them as the
//! CSV the dashboard reads:
//!
//! - **client**: sign-in and the daily sleep endpoint
//! - **types**: response payloads and the CSV row layouts
//! - **extract**: date ranges, the per-day fetch loop and CSV writing
//! - **error**: Error types

mod client;
mod error;
mod extract;
mod types;

pub use client::{Credentials, GarminClient};
pub use error::{GarminError, GarminResult};
pub use extract::{
    extract_sleep, write_csv, write_csv_file, DateRange, ExtractFormat, ExtractReport,
    DEFAULT_RANGE_DAYS,
};
pub use types::{
    DailySleepDto, DetailedSleepRow, Night, OverallScore, SleepDataPayload, SleepRow,
    SleepScores, DETAILED_COLUMNS, SLEEP_COLUMNS,
};

use async_trait::async_trait;
use chrono::NaiveDate;

/// Anything that can return the sleep payload for one calendar date
#[async_trait]
pub trait SleepSource: Send + Sync {
    async fn fetch_sleep(&self, date: NaiveDate) -> GarminResult<SleepDataPayload>;
}
