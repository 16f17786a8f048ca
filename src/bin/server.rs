//! Telemetry Server
//!
//! Run with: cargo run --bin telemetry-server
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (see `telemetry-cli config`),
//! then applies environment overrides:
//! - `TELEMETRY_DASH_HOST`: Host to bind to (default: 0.0.0.0)
//! - `TELEMETRY_DASH_PORT`: Port to listen on (default: 8080)
//! - `TELEMETRY_DASH_SOURCE`: `simulated` or `system` (default: simulated)
//! - `TELEMETRY_DASH_STATIC_DIR`: Built dashboard (default: dashboard-ui/dist)
//! - `RUST_LOG`: Log filter, overrides the configured level

use std::path::PathBuf;
use telemetry_dash::api::{serve, AppState};
use telemetry_dash::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_with_env(&path)?,
        None => Config::load_default(),
    };

    telemetry_dash::logging::init(&config.logging);

    tracing::info!("Starting telemetry server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Telemetry source: {}", config.telemetry.source);

    let static_dir = PathBuf::from(&config.server.static_dir);
    if static_dir.join("index.html").exists() {
        tracing::info!("Serving dashboard from {:?}", static_dir);
    } else {
        tracing::warn!(
            "Dashboard not found at {:?} (build it with `trunk build` in dashboard-ui)",
            static_dir
        );
    }

    let source = telemetry_dash::build_source(&config.telemetry);
    let state = AppState::new(source, config.server.clone());

    serve(state, &config.server).await?;

    tracing::info!("Telemetry server stopped");
    Ok(())
}
