//! # Telemetry Dash
//!
//! Backend for the telemetry dashboard: serves CPU and memory readings over
//! HTTP, collects them into record files, and inspects them from the command
//! line. The dashboard itself lives in the `dashboard-ui` crate.
//!
//! ## Modules
//!
//! - [`telemetry`]: readings, sources, record files and summaries
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telemetry_dash::telemetry::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SimulatedSource::new(1);
//!
//!     // Five readings, half a second apart
//!     let readings = process(&source, 5, Duration::from_millis(500)).await?;
//!     for reading in &readings {
//!         println!("{}", format_line(reading));
//!     }
//!
//!     save_to_file(&readings, "telemetry_output.txt".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, TelemetryConfig};

pub use telemetry::{
    SimulatedSource, SourceKind, Summary, SystemSource, TelemetryError, TelemetryReading,
    TelemetryResult, TelemetrySample, TelemetrySource,
};

/// Build the source selected by the configuration
///
/// The system source starts its sampler here, so this must run inside a
/// Tokio runtime.
pub fn build_source(config: &TelemetryConfig) -> Arc<dyn TelemetrySource> {
    match config.source {
        SourceKind::Simulated => Arc::new(SimulatedSource::new(config.batch_size)),
        SourceKind::System => Arc::new(SystemSource::spawn(
            config.batch_size,
            Duration::from_millis(config.sample_interval_ms),
            config.history_capacity,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_source_simulated() {
        let source = build_source(&TelemetryConfig::default());
        assert_eq!(source.name(), "simulated");
        assert_eq!(source.snapshot().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_build_source_system() {
        let config = TelemetryConfig {
            source: SourceKind::System,
            ..TelemetryConfig::default()
        };
        let source = build_source(&config);
        assert_eq!(source.name(), "system");
        // The sampler has not ticked yet
        assert!(source.snapshot().await.unwrap().len() <= config.batch_size);
    }
}
