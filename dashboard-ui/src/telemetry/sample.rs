//! Telemetry Sample
//!
//! One reading as served by `GET /api/telemetry`. Decoding is lenient:
//! a missing or non-numeric percentage becomes `NaN` and a non-string
//! timestamp is kept in its JSON text form, so a single odd field never
//! rejects a whole batch.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single CPU/memory reading
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Displayed verbatim, never parsed
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
    #[serde(default = "missing_percent", deserialize_with = "lenient_percent")]
    pub cpu_usage: f64,
    #[serde(default = "missing_percent", deserialize_with = "lenient_percent")]
    pub memory_usage: f64,
}

fn missing_percent() -> f64 {
    f64::NAN
}

fn lenient_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64().unwrap_or(f64::NAN))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_batch() {
        let json = r#"[
            {"timestamp": "Mon Jan 01 10:00:00 UTC 2024", "cpuUsage": 42.5, "memoryUsage": 61.25},
            {"timestamp": "t2", "cpuUsage": 10, "memoryUsage": 20}
        ]"#;

        let samples: Vec<TelemetrySample> = serde_json::from_str(json).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, "Mon Jan 01 10:00:00 UTC 2024");
        assert_eq!(samples[0].cpu_usage, 42.5);
        assert_eq!(samples[1].memory_usage, 20.0);
    }

    #[test]
    fn test_non_numeric_fields_become_nan() {
        let json = r#"{"timestamp": "t1", "cpuUsage": "high", "memoryUsage": null}"#;
        let sample: TelemetrySample = serde_json::from_str(json).unwrap();

        assert!(sample.cpu_usage.is_nan());
        assert!(sample.memory_usage.is_nan());
    }

    #[test]
    fn test_missing_fields() {
        let sample: TelemetrySample = serde_json::from_str("{}").unwrap();

        assert_eq!(sample.timestamp, "");
        assert!(sample.cpu_usage.is_nan());
        assert!(sample.memory_usage.is_nan());
    }

    #[test]
    fn test_numeric_timestamp_kept_as_text() {
        let json = r#"{"timestamp": 1700000000, "cpuUsage": 1, "memoryUsage": 2}"#;
        let sample: TelemetrySample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.timestamp, "1700000000");
    }

    #[test]
    fn test_non_array_body_is_rejected() {
        let result = serde_json::from_str::<Vec<TelemetrySample>>(r#"{"error": "nope"}"#);
        assert!(result.is_err());
    }
}
