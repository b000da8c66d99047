//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes liveness/readiness checks.
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (sleep CSV is present)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness check.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness check.
/// Returns 200 once the configured CSV file exists.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if data_file_present(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let present = data_file_present(&state).await;

    Json(HealthResponse {
        status: if present { "healthy" } else { "degraded" }.to_string(),
        data_file: state.csv_path().display().to_string(),
        data_file_present: present,
        started_at: state.started_at,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn data_file_present(state: &AppState) -> bool {
    tokio::fs::try_exists(state.csv_path())
        .await
        .unwrap_or(false)
}
