//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (source answers)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the telemetry source can produce a snapshot.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_source(&state).await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, source_status) = match check_source(&state).await {
        Ok(()) => ("healthy", "ok".to_string()),
        Err(e) => ("degraded", e),
    };

    Json(HealthResponse {
        status: status.to_string(),
        source: state.source.name().to_string(),
        source_status,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_source(state: &AppState) -> Result<(), String> {
    state
        .source
        .snapshot()
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}
