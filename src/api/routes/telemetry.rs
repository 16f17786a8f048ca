//! Telemetry Routes
//!
//! - GET /api/telemetry - Current batch of readings from the configured source

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::TelemetrySample;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/telemetry
///
/// Returns a JSON array of samples, oldest first. An empty array is a
/// valid response.
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TelemetrySample>>> {
    let readings = state.source.snapshot().await?;

    tracing::debug!(
        source = %state.source.name(),
        count = readings.len(),
        "Serving telemetry"
    );

    Ok(Json(readings.iter().map(TelemetrySample::from).collect()))
}
