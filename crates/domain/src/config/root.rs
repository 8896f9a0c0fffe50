use serde::{Deserialize, Serialize};

use super::backend::BackendConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::relay::{RelayConfig, TransformerKind};
use super::server::ServerConfig;

/// Smallest message every DNS implementation must accept over UDP.
const MIN_MESSAGE_SIZE: usize = 512;

/// Main configuration structure for qname-relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket
    #[serde(default)]
    pub server: ServerConfig,

    /// Authoritative backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Command parsing and worker pool
    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. qname-relay.toml in current directory
    /// 3. /etc/qname-relay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("qname-relay.toml").exists() {
            Self::from_file("qname-relay.toml")?
        } else if std::path::Path::new("/etc/qname-relay/config.toml").exists() {
            Self::from_file("/etc/qname-relay/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(backend) = overrides.backend {
            match backend.rsplit_once(':') {
                Some((address, port)) if port.parse::<u16>().is_ok() => {
                    self.backend.address = address.trim_matches(['[', ']']).to_string();
                    self.backend.port = port.parse().unwrap_or(self.backend.port);
                }
                _ => self.backend.address = backend,
            }
        }
        if let Some(domain) = overrides.backend_domain {
            self.backend.domain = domain;
        }
        if let Some(zone_labels) = overrides.zone_labels {
            self.relay.zone_labels = zone_labels;
        }
        if let Some(workers) = overrides.num_workers {
            self.relay.num_workers = workers;
        }
        if let Some(transformer) = overrides.transformer {
            self.relay.transformer = transformer;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("Listen port cannot be 0".to_string()));
        }

        if self.backend.port == 0 {
            return Err(ConfigError::Validation("Backend port cannot be 0".to_string()));
        }

        if self.backend.domain.trim_matches('.').is_empty() {
            return Err(ConfigError::Validation("Backend domain cannot be empty".to_string()));
        }

        if self.backend.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Backend timeout must be greater than 0".to_string(),
            ));
        }

        if self.relay.num_workers == 0 {
            return Err(ConfigError::Validation(
                "Worker pool needs at least one worker".to_string(),
            ));
        }

        if self.server.max_request_size < MIN_MESSAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "max_request_size {} is below the {} byte DNS minimum",
                self.server.max_request_size, MIN_MESSAGE_SIZE
            )));
        }

        if usize::from(self.server.max_response_size) < MIN_MESSAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "max_response_size {} is below the {} byte DNS minimum",
                self.server.max_response_size, MIN_MESSAGE_SIZE
            )));
        }

        if self.backend.max_response_size < MIN_MESSAGE_SIZE {
            return Err(ConfigError::Validation(format!(
                "backend max_response_size {} is below the {} byte DNS minimum",
                self.backend.max_response_size, MIN_MESSAGE_SIZE
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub backend: Option<String>,
    pub backend_domain: Option<String>,
    pub zone_labels: Option<usize>,
    pub num_workers: Option<usize>,
    pub transformer: Option<TransformerKind>,
    pub log_level: Option<String>,
}
