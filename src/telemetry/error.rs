//! Telemetry error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing or storing telemetry
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Record file could not be read or written
    #[error("Record file {path:?}: {error}")]
    RecordFile { path: PathBuf, error: String },

    /// Sampling the host failed
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// Unknown source name in configuration
    #[error("Unknown telemetry source: {0}")]
    UnknownSource(String),
}

/// Result type alias for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;
