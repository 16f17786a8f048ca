//! Data Transfer Objects
//!
//! Response types for the API endpoints. Telemetry itself is served as
//! [`TelemetrySample`] arrays.

use serde::Serialize;

pub use crate::telemetry::TelemetrySample;

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Name of the telemetry source
    pub source: String,
    /// "ok" or the source error message
    pub source_status: String,
    pub uptime_seconds: u64,
    pub version: String,
}
