//! Telemetry Dash CLI
//!
//! Command-line interface for telemetry operations:
//! - Fetch readings from a running server
//! - Watch a server with auto-refresh
//! - Generate and inspect record files

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use telemetry_dash::config::{generate_default_config, LoggingConfig};
use telemetry_dash::telemetry::{self, SimulatedSource, Summary, TelemetrySample};

#[derive(Parser)]
#[command(name = "telemetry-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect CPU and memory telemetry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Telemetry endpoint
    #[arg(long, default_value = "http://localhost:8080/api/telemetry", global = true)]
    pub endpoint: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one batch of readings
    Fetch,

    /// Fetch repeatedly until interrupted
    Watch {
        /// Refresh period in milliseconds
        #[arg(short, long, default_value = "3000")]
        interval_ms: u64,
    },

    /// Generate simulated readings and save them as a record file
    Generate {
        /// Number of readings
        #[arg(short, long, default_value = "5")]
        count: usize,
        /// Delay between readings in milliseconds
        #[arg(short, long, default_value = "500")]
        delay_ms: u64,
        /// Record file to write
        #[arg(short, long, default_value = "telemetry_output.txt")]
        output: PathBuf,
    },

    /// Print the readings stored in a record file
    Show {
        /// Record file to read
        path: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry_dash::logging::init(&LoggingConfig {
        level: "warn".to_string(),
        ..LoggingConfig::default()
    });

    match cli.command {
        Commands::Fetch => {
            let client = reqwest::Client::new();
            let samples = fetch(&client, &cli.endpoint).await?;
            print_samples(&samples, cli.format)?;
        }

        Commands::Watch { interval_ms } => {
            if interval_ms == 0 {
                bail!("interval must be greater than zero");
            }
            watch(&cli.endpoint, Duration::from_millis(interval_ms), cli.format).await?;
        }

        Commands::Generate {
            count,
            delay_ms,
            output,
        } => {
            let source = SimulatedSource::new(1);
            let readings =
                telemetry::process(&source, count, Duration::from_millis(delay_ms)).await?;
            telemetry::save_to_file(&readings, &output)?;

            let samples: Vec<TelemetrySample> = readings.iter().map(TelemetrySample::from).collect();
            print_samples(&samples, cli.format)?;
            eprintln!("Processed telemetry data saved to {}", output.display());
        }

        Commands::Show { path } => {
            let samples = telemetry::load_from_file(&path)?;
            print_samples(&samples, cli.format)?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("✓ Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// One GET against the telemetry endpoint
async fn fetch(client: &reqwest::Client, endpoint: &str) -> anyhow::Result<Vec<TelemetrySample>> {
    let response = client
        .get(endpoint)
        .send()
        .await
        .with_context(|| format!("requesting {}", endpoint))?;

    let status = response.status();
    if !status.is_success() {
        bail!("HTTP error! status: {}", status.as_u16());
    }

    response
        .json()
        .await
        .context("parsing telemetry response")
}

/// Poll until Ctrl+C; failures are reported and polling continues
async fn watch(endpoint: &str, period: Duration, format: OutputFormat) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    eprintln!(
        "Auto-refresh every {} ms from {} (Ctrl+C to stop)",
        period.as_millis(),
        endpoint
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match fetch(&client, endpoint).await {
                    Ok(samples) => {
                        println!("── {} ──", chrono::Local::now().format("%H:%M:%S"));
                        print_samples(&samples, format)?;
                    }
                    Err(e) => eprintln!("✕ Error fetching data: {:#}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("Auto-refresh stopped");
                return Ok(());
            }
        }
    }
}

fn print_samples(samples: &[TelemetrySample], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(samples)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["index", "timestamp", "cpu_usage", "memory_usage"])?;
            for (i, sample) in samples.iter().enumerate() {
                writer.write_record([
                    (i + 1).to_string(),
                    sample.timestamp.clone(),
                    format!("{:.2}", sample.cpu_usage),
                    format!("{:.2}", sample.memory_usage),
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if samples.is_empty() {
                println!("No telemetry data available");
                return Ok(());
            }

            println!(
                "{:<4} {:<32} {:>10} {:>10}",
                "#", "Timestamp", "CPU", "Memory"
            );
            println!("{}", "─".repeat(59));
            for (i, sample) in samples.iter().enumerate() {
                println!(
                    "{:<4} {:<32} {:>9.2}% {:>9.2}%",
                    i + 1,
                    sample.timestamp,
                    sample.cpu_usage,
                    sample.memory_usage
                );
            }

            if let Some(summary) = Summary::from_samples(samples) {
                println!();
                println!("Total readings: {}", summary.count);
                println!("Average CPU:    {:.2}%", summary.avg_cpu);
                println!("Average memory: {:.2}%", summary.avg_memory);
                println!("Peak CPU:       {:.2}%", summary.max_cpu);
            }
        }
    }

    Ok(())
}
