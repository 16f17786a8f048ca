//! Telemetry sources
//!
//! A source yields one batch per call. The browser build talks HTTP
//! (`crate::api::HttpTelemetrySource`); tests script their own.

use async_trait::async_trait;
use thiserror::Error;

use super::sample::TelemetrySample;

/// Why a batch could not be fetched
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request never got an HTTP response
    #[error("{0}")]
    Network(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The body was not a JSON array of readings
    #[error("{0}")]
    Parse(String),
}

/// Provider of telemetry batches
#[async_trait(?Send)]
pub trait TelemetrySource {
    async fn fetch(&self) -> Result<Vec<TelemetrySample>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(FetchError::Status(500).to_string(), "HTTP error! status: 500");
        assert_eq!(
            FetchError::Network("Failed to fetch".to_string()).to_string(),
            "Failed to fetch"
        );
    }
}
