//! Configuration loading and typed config structures for the cafe finder.
//!
//! The service reads `cafe-config.yaml` (or the file named by
//! `CAFE_CONFIG`). Every section and field is optional and falls back to
//! the defaults below. Environment variables are applied on top of the
//! parsed file:
//!
//! - `CAFE_HOST` overrides `server.host`
//! - `CAFE_PORT` overrides `server.port`
//! - `CAFE_LOG_LEVEL` overrides `logging.level`
//! - `CAFE_CATALOG_PATH` overrides `catalog.path`

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong shape.
    #[error("invalid value {value:?} for {var}")]
    InvalidOverride {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration, mirroring `cafe-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where the venue catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for a malformed environment value.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_file_with(path, |var| std::env::var(var).ok())
    }

    /// Load configuration from a YAML file, taking overrides from `lookup`
    /// instead of the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceConfig::from_file`].
    pub fn from_file_with<F>(path: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for a malformed environment value.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `CAFE_PORT` is not a
    /// valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides read through `lookup`, which maps a variable name to
    /// its value when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] if `CAFE_PORT` is not a
    /// valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CAFE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CAFE_PORT") {
            self.server.port = port.parse().map_err(|e| {
                tracing::debug!(error = %e, "rejecting CAFE_PORT override");
                ConfigError::InvalidOverride {
                    var: "CAFE_PORT",
                    value: port.clone(),
                }
            })?;
        }
        if let Some(level) = lookup("CAFE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(path) = lookup("CAFE_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(path));
        }
        Ok(())
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Catalog source. The built-in dataset is used when `path` is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Optional YAML catalog file.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn parse_without_env(yaml: &str) -> ServiceConfig {
        serde_yml::from_str(yaml).unwrap()
    }

    #[test]
    fn default_config_is_valid() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.catalog.path, None);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 9090
logging:
  level: "debug"
  format: json
catalog:
  path: "/etc/cafe/catalog.yaml"
"#;
        let config = parse_without_env(yaml);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.catalog.path,
            Some(PathBuf::from("/etc/cafe/catalog.yaml"))
        );
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let config = parse_without_env("server:\n  port: 3000\n");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result: Result<ServiceConfig, _> = serde_yml::from_str("logging:\n  format: xml\n");
        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let env: BTreeMap<&str, &str> = [
            ("CAFE_HOST", "127.0.0.1"),
            ("CAFE_PORT", "7000"),
            ("CAFE_LOG_LEVEL", "warn"),
            ("CAFE_CATALOG_PATH", "venues.yaml"),
        ]
        .into_iter()
        .collect();

        let mut config = ServiceConfig::default();
        config
            .apply_overrides(|var| env.get(var).map(|v| (*v).to_owned()))
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.catalog.path, Some(PathBuf::from("venues.yaml")));
    }

    #[test]
    fn no_overrides_leaves_config_untouched() {
        let mut config = ServiceConfig::default();
        config.apply_overrides(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn invalid_port_override_is_rejected() {
        let mut config = ServiceConfig::default();
        let result =
            config.apply_overrides(|var| (var == "CAFE_PORT").then(|| "http".to_owned()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { var: "CAFE_PORT", .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = ServiceConfig::from_file(Path::new("/definitely/not/cafe-config.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
