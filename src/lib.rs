//! # Sleep Dashboard
//!
//! Serves Garmin sleep records from a CSV export and summarises them for a
//! stacked sleep/awake bar chart.
//!
//! ## Modules
//!
//! - [`sleep`]: Sleep records, CSV loading and averaging
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`garmin`]: Garmin Connect extraction into the sleep CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sleep_dashboard::sleep::parse_sleep_csv;
//!
//! let report = parse_sleep_csv("date,total_sleep\n2024-01-01,7.5\n2024-01-02,8.0\n")?;
//!
//! assert_eq!(report.records[0].awake_time, 16.5);
//! assert_eq!(report.average(), Some(7.75));
//! # Ok::<(), sleep_dashboard::sleep::SleepDataError>(())
//! ```

pub mod api;
pub mod config;
pub mod garmin;
pub mod sleep;

// Re-export top-level types for convenience
pub use sleep::{
    average_sleep_time, load_sleep_data, parse_sleep_csv, LoadReport, RowIssue, SleepCsvLoader,
    SleepDataError, SleepDataResult, SleepRecord, HOURS_PER_DAY,
};

pub use api::{build_router, serve, ApiError, AppState, SleepDataResponse};

pub use config::{
    ApiConfig, Config, ConfigError, ConfigSource, DataConfig, LoadedConfig, LoggingConfig,
};
