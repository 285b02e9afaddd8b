//! Server configuration
//!
//! Defaults, then the TOML file named by `ASSIGNMENTS_CONFIG` (if set), then the `PORT`
//! environment variable.

use std::{env::var, net::SocketAddr, path::Path};

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

pub const CONFIG_PATH_VAR: &str = "ASSIGNMENTS_CONFIG";
pub const PORT_VAR: &str = "PORT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// One of trace, debug, info, warn, error
    pub log_level: String,
    /// Largest accepted request body, in bytes
    pub body_limit: usize,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            log_level: "info".into(),
            body_limit: 100 * 1024,
            cors: true,
        }
    }
}

impl Config {
    /// Builds the configuration from the environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(port) = var(PORT_VAR) {
            config.port = parse_port(&port)?;
        }

        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "host".into(),
                value: self.host.clone(),
                reason: format!("{e}"),
            })
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "log_level".into(),
                value: self.log_level.clone(),
                reason: "expected trace, debug, info, warn or error".into(),
            })
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|e| ConfigError::InvalidValue {
        key: PORT_VAR.into(),
        value: value.into(),
        reason: format!("{e}"),
    })
}
