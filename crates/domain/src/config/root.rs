use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::global::GlobalConfig;
use super::ingest::IngestConfig;
use super::logging::LoggingConfig;
use super::sinks::SinksConfig;
use super::transformers::TransformersConfig;

/// Main configuration structure for dnstail.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Shared text-format settings.
    #[serde(default)]
    pub global: GlobalConfig,

    /// UDP ingest listener.
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Keep/drop and scoring rules.
    #[serde(default)]
    pub transformers: TransformersConfig,

    /// Log sinks.
    #[serde(default)]
    pub sinks: SinksConfig,

    /// Console logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults.
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnstail.toml in current directory
    /// 3. /etc/dnstail/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dnstail.toml").exists() {
            Self::from_file("dnstail.toml")?
        } else if std::path::Path::new("/etc/dnstail/config.toml").exists() {
            Self::from_file("/etc/dnstail/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.ingest.port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.ingest.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ingest.port == 0 {
            return Err(ConfigError::Validation(
                "ingest port cannot be 0".to_string(),
            ));
        }

        if self.ingest.channel_buffer_size == 0 {
            return Err(ConfigError::Validation(
                "channel buffer size cannot be 0".to_string(),
            ));
        }

        let syslog = &self.sinks.syslog;
        if syslog.enable {
            if !matches!(syslog.transport.as_str(), "local" | "udp" | "tcp") {
                return Err(ConfigError::Validation(format!(
                    "invalid syslog transport '{}'",
                    syslog.transport
                )));
            }
            if !matches!(syslog.format.as_str(), "rfc3164" | "rfc5424") {
                return Err(ConfigError::Validation(format!(
                    "invalid syslog format '{}'",
                    syslog.format
                )));
            }
        }

        if self.sinks.tcp_client.enable && self.sinks.tcp_client.remote_address.is_empty() {
            return Err(ConfigError::Validation(
                "tcp_client sink requires a remote address".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
