//! Cafe finder service binary.
//!
//! Wires configuration, logging, the venue catalog and the query API
//! together and serves until the process is asked to stop.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `cafe-config.yaml` (or `$CAFE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the catalog from the configured file or the built-in dataset
//! 4. Serve `GET /cafe` until `Ctrl-C` or `SIGTERM`

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cafe_api::{AppState, ServerConfig};
use cafe_core::config::{LogFormat, LoggingConfig};
use cafe_core::{Catalog, ServiceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServiceError;

/// Config file read when `CAFE_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "cafe-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging, catalog loading, or the
/// server fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_path) =
        load_config(|var| std::env::var(var).ok(), Path::new(DEFAULT_CONFIG_PATH))?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("cafe-server starting");
    if let Some(path) = &config_path {
        info!(path = %path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }
    info!(
        host = %config.server.host,
        port = config.server.port,
        log_level = %config.logging.level,
        "Effective configuration"
    );

    // 3. Build the catalog.
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::from_file(path).map_err(ServiceError::from)?,
        None => Catalog::builtin(),
    };
    info!(
        cities = catalog.city_count(),
        venues = catalog.venue_count(),
        "Catalog ready"
    );

    // 4. Serve.
    let server_config = ServerConfig::from(&config.server);
    cafe_api::start_server(&server_config, Arc::new(AppState::new(catalog)))
        .await
        .map_err(ServiceError::from)?;

    info!("cafe-server stopped");
    Ok(())
}

/// Load the service configuration.
///
/// `lookup` reads environment variables. A file named by `CAFE_CONFIG` must
/// exist. Otherwise `default_path` is read when present, and a missing
/// default file means defaults plus environment overrides. Returns the path
/// that was read, if any.
fn load_config<F>(
    lookup: F,
    default_path: &Path,
) -> Result<(ServiceConfig, Option<PathBuf>), ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("CAFE_CONFIG").map(PathBuf::from) {
        let config = ServiceConfig::from_file_with(&path, lookup)?;
        return Ok((config, Some(path)));
    }

    if default_path.exists() {
        let config = ServiceConfig::from_file_with(default_path, lookup)?;
        Ok((config, Some(default_path.to_path_buf())))
    } else {
        let mut config = ServiceConfig::default();
        config.apply_overrides(lookup)?;
        Ok((config, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), ServiceError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .map_err(|e| ServiceError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match logging.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ServiceError::Logging {
        message: e.to_string(),
    })
}
