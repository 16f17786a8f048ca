//! Telemetry
//!
//! CPU and memory usage readings and the places they come from:
//!
//! - **types**: `TelemetryReading` and its JSON wire form `TelemetrySample`
//! - **source**: `TelemetrySource` trait with simulated and host-backed sources
//! - **processor**: batch collection and the plain-text record file format
//! - **stats**: summary statistics over a batch
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use telemetry_dash::telemetry::{SimulatedSource, TelemetrySource, Summary};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SimulatedSource::new(5);
//!     let readings = source.snapshot().await?;
//!
//!     if let Some(summary) = Summary::from_readings(&readings) {
//!         println!("{}", summary);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod processor;
pub mod source;
pub mod stats;
pub mod types;

pub use error::{TelemetryError, TelemetryResult};
pub use processor::{format_line, load_from_file, parse_line, process, save_to_file};
pub use source::{SimulatedSource, SourceKind, SystemSource, TelemetrySource};
pub use stats::Summary;
pub use types::{TelemetryReading, TelemetrySample, TIMESTAMP_FORMAT};
