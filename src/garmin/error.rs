//! Garmin extraction errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GarminError {
    #[error("GARMIN_EMAIL and GARMIN_PASSWORD environment variables must be set")]
    MissingCredentials,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Too many requests, wait a while before trying again")]
    RateLimited,

    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GarminError {
    /// Errors that make every further request pointless
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GarminError::MissingCredentials | GarminError::AuthFailed(_) | GarminError::RateLimited
        )
    }
}

pub type GarminResult<T> = Result<T, GarminError>;
