//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ApiConfig, DataConfig};
use crate::sleep::SleepCsvLoader;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Path of the sleep CSV, re-read on every request
    pub csv_path: PathBuf,
    /// Loader configured with the column names to read
    pub loader: SleepCsvLoader,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// Wall-clock start time reported by the health endpoint
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state reading the default Garmin columns from `csv_path`
    pub fn new(csv_path: impl Into<PathBuf>, config: ApiConfig) -> Self {
        Self {
            csv_path: csv_path.into(),
            loader: SleepCsvLoader::new(),
            config: Arc::new(config),
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Create state from the `[data]` and `[api]` config sections
    pub fn from_config(data: &DataConfig, config: ApiConfig) -> Self {
        Self {
            loader: SleepCsvLoader::new()
                .with_date_column(&data.date_column)
                .with_sleep_column(&data.sleep_column),
            ..Self::new(data.csv_path(), config)
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
