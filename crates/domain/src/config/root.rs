use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::echo::EchoConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for echo-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Echo pipeline configuration (zones, TTL, debug logging)
    #[serde(default)]
    pub echo: EchoConfig,

    /// Delegate resolver configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. echo-dns.toml in current directory
    /// 3. /etc/echo-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("echo-dns.toml").exists() {
            Self::from_file("echo-dns.toml")?
        } else if std::path::Path::new("/etc/echo-dns/config.toml").exists() {
            Self::from_file("/etc/echo-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize_zones();
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(server) = overrides.upstream_server {
            self.upstream.server = server;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Zones are matched by exact string equality against lower-cased query
    /// names, so bring the configured forms onto the same footing.
    fn normalize_zones(&mut self) {
        for zone in &mut self.echo.zones {
            *zone = zone.trim_end_matches('.').to_ascii_lowercase();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.echo.zones.is_empty() {
            return Err(ConfigError::Validation(
                "No echo zones configured".to_string(),
            ));
        }

        for zone in &self.echo.zones {
            if zone.is_empty() || zone.starts_with('.') || zone.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "Invalid echo zone '{}'",
                    zone
                )));
            }
        }

        if self.echo.ttl == 0 {
            return Err(ConfigError::Validation(
                "Echo TTL cannot be 0".to_string(),
            ));
        }

        if self.upstream.server.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Upstream server '{}' is not a socket address",
                self.upstream.server
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_server: Option<String>,
    pub log_level: Option<String>,
}
