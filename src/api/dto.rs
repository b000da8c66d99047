//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sleep::{average_sleep_time, LoadReport, SleepRecord};

// ============================================
// SLEEP DATA DTOs
// ============================================

/// Body of `GET /api/sleep-data`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepDataResponse {
    /// Records in file order
    pub sleep_data: Vec<SleepRecord>,
    /// Mean sleep hours, `null` when there are no records
    pub avg_sleep_time: Option<f64>,
}

impl SleepDataResponse {
    /// Build a response, computing the average from the records
    pub fn from_records(sleep_data: Vec<SleepRecord>) -> Self {
        let avg_sleep_time = average_sleep_time(&sleep_data);
        Self {
            sleep_data,
            avg_sleep_time,
        }
    }

    /// The shape returned on any load failure
    pub fn empty() -> Self {
        Self {
            sleep_data: Vec::new(),
            avg_sleep_time: None,
        }
    }
}

impl From<LoadReport> for SleepDataResponse {
    fn from(report: LoadReport) -> Self {
        Self::from_records(report.records)
    }
}

/// Body of `GET /api/sleep-data/report`
#[derive(Debug, Serialize)]
pub struct LoadReportResponse {
    #[serde(flatten)]
    pub report: LoadReport,
    /// Mean sleep hours over the kept records
    pub avg_sleep_time: Option<f64>,
}

impl From<LoadReport> for LoadReportResponse {
    fn from(report: LoadReport) -> Self {
        let avg_sleep_time = report.average();
        Self {
            report,
            avg_sleep_time,
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Configured CSV path
    pub data_file: String,
    /// Whether the CSV file currently exists
    pub data_file_present: bool,
    /// Server start time
    pub started_at: DateTime<Utc>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
