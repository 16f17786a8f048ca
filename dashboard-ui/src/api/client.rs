//! HTTP API Client
//!
//! Functions for communicating with the telemetry server.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::telemetry::{FetchError, TelemetrySample, TelemetrySource};

/// Telemetry source backed by `GET /api/telemetry`
#[derive(Clone, Debug)]
pub struct HttpTelemetrySource {
    endpoint: String,
}

impl HttpTelemetrySource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl TelemetrySource for HttpTelemetrySource {
    async fn fetch(&self) -> Result<Vec<TelemetrySample>, FetchError> {
        let response = Request::get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))
    }
}

// ============ Health ============

#[derive(Clone, Debug, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub source: String,
    #[serde(default)]
    pub source_status: String,
    #[serde(default)]
    pub uptime_seconds: u64,
}

/// Check server health
pub async fn check_health(health_url: &str) -> Result<HealthResponse, String> {
    let response = Request::get(health_url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server is not healthy (status {})", response.status()));
    }

    response.json().await
        .map_err(|e| format!("Parse error: {}", e))
}
