//! Telemetry server API
//!
//! HTTP access to the telemetry server from the browser.

pub mod client;

pub use client::{check_health, HttpTelemetrySource};
