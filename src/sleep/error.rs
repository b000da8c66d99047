//! Sleep data error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading sleep data
#[derive(Error, Debug)]
pub enum SleepDataError {
    /// The CSV file could not be opened or read
    #[error("Failed to read sleep data from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader failed on the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for sleep data operations
pub type SleepDataResult<T> = Result<T, SleepDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SleepDataError::Read {
            path: PathBuf::from("data/garmin_sleep_data.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read sleep data from \"data/garmin_sleep_data.csv\": No such file"
        );
    }
}
