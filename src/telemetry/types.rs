//! Core telemetry types
//!
//! - `TelemetryReading`: one CPU/memory measurement taken by this process
//! - `TelemetrySample`: the JSON shape served at `/api/telemetry`

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Display format of sample timestamps, e.g. `Sun Nov 16 12:10:46 +05:30 2025`
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";

/// A single CPU/memory measurement
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryReading {
    /// When the reading was taken
    pub timestamp: DateTime<Local>,
    /// CPU usage percentage
    pub cpu_usage: f64,
    /// Memory usage percentage
    pub memory_usage: f64,
}

impl TelemetryReading {
    /// Create a reading stamped now
    pub fn new(cpu_usage: f64, memory_usage: f64) -> Self {
        Self {
            timestamp: Local::now(),
            cpu_usage,
            memory_usage,
        }
    }

    /// Create a reading with a specific timestamp
    pub fn with_timestamp(cpu_usage: f64, memory_usage: f64, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            cpu_usage,
            memory_usage,
        }
    }

    /// Timestamp rendered for display
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Convert to the wire form
    pub fn to_sample(&self) -> TelemetrySample {
        TelemetrySample {
            timestamp: self.display_timestamp(),
            cpu_usage: self.cpu_usage,
            memory_usage: self.memory_usage,
        }
    }
}

/// Telemetry sample as exchanged over HTTP
///
/// The timestamp is an opaque display string; clients never parse it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    pub timestamp: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
}

impl From<&TelemetryReading> for TelemetrySample {
    fn from(reading: &TelemetryReading) -> Self {
        reading.to_sample()
    }
}

impl std::fmt::Display for TelemetrySample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time: {} | CPU Usage: {:.2}% | Memory Usage: {:.2}%",
            self.timestamp, self.cpu_usage, self.memory_usage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sample_serializes_camel_case() {
        let sample = TelemetrySample {
            timestamp: "t1".to_string(),
            cpu_usage: 50.0,
            memory_usage: 20.5,
        };

        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(json["timestamp"], "t1");
        assert_eq!(json["cpuUsage"], 50.0);
        assert_eq!(json["memoryUsage"], 20.5);
    }

    #[test]
    fn test_reading_to_sample() {
        let ts = Local.with_ymd_and_hms(2025, 11, 16, 12, 10, 46).unwrap();
        let reading = TelemetryReading::with_timestamp(47.5, 43.125, ts);
        let sample = reading.to_sample();

        assert!(sample.timestamp.starts_with("Sun Nov 16 12:10:46 "));
        assert!(sample.timestamp.ends_with(" 2025"));
        assert_eq!(sample.cpu_usage, 47.5);
        assert_eq!(sample.memory_usage, 43.125);
    }

    #[test]
    fn test_sample_display() {
        let sample = TelemetrySample {
            timestamp: "now".to_string(),
            cpu_usage: 47.5,
            memory_usage: 43.126,
        };
        assert_eq!(
            sample.to_string(),
            "Time: now | CPU Usage: 47.50% | Memory Usage: 43.13%"
        );
    }
}
