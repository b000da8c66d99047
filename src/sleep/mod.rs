//! Sleep Data
//!
//! Loading and summarising the Garmin sleep export:
//!
//! - **types**: `SleepRecord`, `LoadReport` and the averaging helper
//! - **loader**: CSV parsing with header-based column lookup
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use sleep_dashboard::sleep::load_sleep_data;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = load_sleep_data(Path::new("data/garmin_sleep_data.csv")).await?;
//!
//!     println!("{} nights, average {:?} hours", report.records.len(), report.average());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{SleepDataError, SleepDataResult};
pub use loader::{
    load_sleep_data, parse_sleep_csv, SleepCsvLoader, DEFAULT_DATE_COLUMN, DEFAULT_SLEEP_COLUMN,
};
pub use types::{average_sleep_time, LoadReport, RowIssue, SleepRecord, HOURS_PER_DAY};
