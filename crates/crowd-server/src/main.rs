//! Server binary for the crowd density telemetry service.
//!
//! Wires configuration, logging, the crowd service, and the HTTP API
//! together and serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `crowd-config.yaml` (or `CROWD_CONFIG`)
//! 2. Initialize structured logging (tracing), then apply `CROWD_HOST` /
//!    `CROWD_PORT` overrides
//! 3. Build the crowd service (registry, generator, clock, history)
//! 4. Serve the HTTP API until shutdown

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crowd_api::{AppState, ServerConfig};
use crowd_core::config::LoggingConfig;
use crowd_core::{CrowdConfig, CrowdService};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerAppError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "crowd-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the server cannot bind.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().await?;
    Ok(())
}

async fn run() -> Result<(), ServerAppError> {
    // 1. Load configuration.
    let config_path = config_path();
    let (mut config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("crowd-server starting");
    if from_file {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    if let Some(value) = config.server.apply_env_overrides() {
        warn!(%value, "Ignoring invalid CROWD_PORT");
    }

    // 3. Build the service.
    let service = CrowdService::from_config(&config)?;
    let state = Arc::new(AppState::new(service));

    // 4. Serve.
    let server_config = ServerConfig::from(&config.server);
    crowd_api::start_server(&server_config, state).await?;

    info!("crowd-server shutdown complete");
    Ok(())
}

/// Resolve the configuration path from `CROWD_CONFIG` or the default.
fn config_path() -> PathBuf {
    std::env::var_os("CROWD_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the configuration and whether it came from the file.
fn load_config(path: &Path) -> Result<(CrowdConfig, bool), ServerAppError> {
    if path.exists() {
        Ok((CrowdConfig::from_file(path)?, true))
    } else {
        Ok((CrowdConfig::default(), false))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` takes precedence
/// over the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
