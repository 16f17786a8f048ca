//! Telemetry Processor
//!
//! Takes a handful of readings half a second apart, logs them and saves them
//! as a record file.
//!
//! Run with: cargo run --bin telemetry-dash

use std::path::Path;
use std::time::Duration;
use telemetry_dash::config::Config;
use telemetry_dash::telemetry::{self, SimulatedSource, Summary};

const READING_COUNT: usize = 5;
const READING_DELAY: Duration = Duration::from_millis(500);
const OUTPUT_FILE: &str = "telemetry_output.txt";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    telemetry_dash::logging::init(&config.logging);

    tracing::info!("Processing telemetry data...");

    let source = SimulatedSource::new(1);
    let readings = telemetry::process(&source, READING_COUNT, READING_DELAY).await?;

    for reading in &readings {
        tracing::info!("{}", telemetry::format_line(reading));
    }

    if let Some(summary) = Summary::from_readings(&readings) {
        tracing::info!("Summary: {}", summary);
    }

    telemetry::save_to_file(&readings, Path::new(OUTPUT_FILE))?;
    tracing::info!("Processed telemetry data saved to {}", OUTPUT_FILE);

    Ok(())
}
