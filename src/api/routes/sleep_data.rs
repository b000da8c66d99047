//! Sleep Data Routes
//!
//! - GET /api/sleep-data - Records and average sleep time
//! - GET /api/sleep-data/report - Records plus rejected and flagged rows

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{LoadReportResponse, SleepDataResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/sleep-data
///
/// Re-reads the CSV on every call. Any load failure becomes a 500 carrying
/// an empty record list and a null average.
pub async fn get_sleep_data(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SleepDataResponse>> {
    let report = state.loader.load(state.csv_path()).await?;

    tracing::info!(
        records = report.records.len(),
        rejected = report.rejected.len(),
        "Served sleep data"
    );

    Ok(Json(report.into()))
}

/// GET /api/sleep-data/report
///
/// Load diagnostics for the current CSV.
pub async fn get_sleep_report(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LoadReportResponse>> {
    let report = state.loader.load(state.csv_path()).await?;
    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_get_sleep_data_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garmin_sleep_data.csv");
        std::fs::write(&path, "date,total_sleep\n2024-01-01,6.0\n2024-01-02,8.0\n").unwrap();

        let state = Arc::new(AppState::new(&path, ApiConfig::default()));
        let Json(response) = get_sleep_data(State(state)).await.unwrap();

        assert_eq!(response.sleep_data.len(), 2);
        assert_eq!(response.avg_sleep_time, Some(7.0));
    }

    #[tokio::test]
    async fn test_get_sleep_data_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = Arc::new(AppState::new(
            dir.path().join("missing.csv"),
            ApiConfig::default(),
        ));

        let result = get_sleep_data(State(state)).await;

        assert!(matches!(result, Err(ApiError::SleepData(_))));
    }

    #[tokio::test]
    async fn test_report_lists_rejected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garmin_sleep_data.csv");
        std::fs::write(&path, "date,total_sleep\n2024-01-01,x\n2024-01-02,8.0\n").unwrap();

        let state = Arc::new(AppState::new(&path, ApiConfig::default()));
        let Json(response) = get_sleep_report(State(state)).await.unwrap();

        assert_eq!(response.report.records.len(), 1);
        assert_eq!(response.report.rejected.len(), 1);
        assert_eq!(response.avg_sleep_time, Some(8.0));
    }
}
