//! Telemetry Processor
//!
//! Collects readings one at a time and stores them as plain-text records:
//!
//! ```text
//! Time: Sun Nov 16 12:10:46 +05:30 2025 | CPU Usage: 47.50% | Memory Usage: 43.13%
//! ```

use regex::Regex;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use super::error::{TelemetryError, TelemetryResult};
use super::source::TelemetrySource;
use super::types::{TelemetryReading, TelemetrySample};

/// Collect `count` readings spaced by `delay`
///
/// Each step keeps the newest reading of one source snapshot. Steps whose
/// snapshot is empty are skipped, so the result may hold fewer than `count`.
pub async fn process(
    source: &dyn TelemetrySource,
    count: usize,
    delay: Duration,
) -> TelemetryResult<Vec<TelemetryReading>> {
    let mut readings = Vec::with_capacity(count);

    for i in 0..count {
        match source.snapshot().await?.pop() {
            Some(reading) => readings.push(reading),
            None => tracing::debug!("Source {} had no reading at step {}", source.name(), i),
        }

        if i + 1 < count && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::debug!("Processed {} readings from {}", readings.len(), source.name());
    Ok(readings)
}

/// Render a reading as one record line
pub fn format_line(reading: &TelemetryReading) -> String {
    reading.to_sample().to_string()
}

/// Write one record line per reading, replacing the file
pub fn save_to_file(readings: &[TelemetryReading], path: &Path) -> TelemetryResult<()> {
    let file = std::fs::File::create(path).map_err(|e| record_error(path, e))?;
    let mut writer = BufWriter::new(file);

    for reading in readings {
        writeln!(writer, "{}", format_line(reading)).map_err(|e| record_error(path, e))?;
    }
    writer.flush().map_err(|e| record_error(path, e))?;

    tracing::info!("Saved {} readings to {:?}", readings.len(), path);
    Ok(())
}

/// Parse a record file, skipping lines that do not match the record format
pub fn load_from_file(path: &Path) -> TelemetryResult<Vec<TelemetrySample>> {
    let file = std::fs::File::open(path).map_err(|e| record_error(path, e))?;
    let reader = BufReader::new(file);

    let mut samples = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| record_error(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(sample) = parse_line(&line) {
            samples.push(sample);
        }
    }

    Ok(samples)
}

/// Parse one record line back into a wire sample
pub fn parse_line(line: &str) -> Option<TelemetrySample> {
    let caps = record_pattern()?.captures(line);
    let parsed = caps.and_then(|caps| {
        let cpu = caps.name("cpu")?.as_str().trim().parse().ok()?;
        let memory = caps.name("memory")?.as_str().trim().parse().ok()?;
        Some(TelemetrySample {
            timestamp: caps.name("time")?.as_str().trim().to_string(),
            cpu_usage: cpu,
            memory_usage: memory,
        })
    });

    if parsed.is_none() {
        tracing::warn!("Skipping malformed record line: {}", line);
    }
    parsed
}

fn record_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"Time:\s*(?P<time>.+?)\s*\|\s*CPU Usage:\s*(?P<cpu>[^%|]+)%\s*\|\s*Memory Usage:\s*(?P<memory>[^%|]+)%",
            )
            .ok()
        })
        .as_ref()
}

fn record_error(path: &Path, error: std::io::Error) -> TelemetryError {
    TelemetryError::RecordFile {
        path: path.to_path_buf(),
        error: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::source::{SimulatedSource, SystemSource};
    use tempfile::tempdir;

    #[test]
    fn test_parse_line() {
        let line = "Time: Sun Nov 16 12:10:46 IST 2025 | CPU Usage: 47.50% | Memory Usage: 43.13%";
        let sample = parse_line(line).unwrap();

        assert_eq!(sample.timestamp, "Sun Nov 16 12:10:46 IST 2025");
        assert_eq!(sample.cpu_usage, 47.5);
        assert_eq!(sample.memory_usage, 43.13);
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        assert!(parse_line("").is_none());
        assert!(parse_line("Time: now | CPU Usage: high% | Memory Usage: 10%").is_none());
        assert!(parse_line("Processed telemetry data saved").is_none());
    }

    #[test]
    fn test_format_line_matches_parse() {
        let reading = TelemetryReading::new(12.346, 67.891);
        let line = format_line(&reading);
        let sample = parse_line(&line).unwrap();

        assert_eq!(sample.timestamp, reading.display_timestamp());
        assert_eq!(sample.cpu_usage, 12.35);
        assert_eq!(sample.memory_usage, 67.89);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("telemetry_output.txt");
        let readings = vec![
            TelemetryReading::new(50.0, 20.0),
            TelemetryReading::new(90.0, 70.0),
        ];

        save_to_file(&readings, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);

        let samples = load_from_file(&path).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].cpu_usage, 90.0);
        assert_eq!(samples[1].memory_usage, 70.0);
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        std::fs::write(
            &path,
            "Time: a | CPU Usage: 1.00% | Memory Usage: 2.00%\n\
             garbage\n\
             \n\
             Time: b | CPU Usage: 3.00% | Memory Usage: 4.00%\n",
        )
        .unwrap();

        let samples = load_from_file(&path).unwrap();
        let stamps: Vec<&str> = samples.iter().map(|s| s.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["a", "b"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_from_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, TelemetryError::RecordFile { .. }));
    }

    #[tokio::test]
    async fn test_process_collects_count() {
        let source = SimulatedSource::new(5);
        let readings = process(&source, 3, Duration::ZERO).await.unwrap();
        assert_eq!(readings.len(), 3);
    }

    #[tokio::test]
    async fn test_process_skips_empty_snapshots() {
        let source = SystemSource::from_history(5, Vec::new());
        let readings = process(&source, 2, Duration::ZERO).await.unwrap();
        assert!(readings.is_empty());
    }
}
