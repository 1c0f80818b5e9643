use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "csv_augmentor.toml";
pub const ENV_PREFIX: &str = "CSV_AUGMENTOR_";

/// Server settings: defaults, then `csv_augmentor.toml`, then `CSV_AUGMENTOR_*` env vars.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Development mode: verbose logging
    pub debug: bool,
    #[validate(range(min = 1))]
    pub workers: Option<usize>,
    /// Overrides the filter derived from `debug`; `RUST_LOG` still wins
    pub log_filter: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            debug: false,
            workers: None,
            log_filter: None,
        }
    }
}

impl ServerConfig {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: ServerConfig = figment
            .extract()
            .map_err(|err| AppError::ConfigError(err.to_string()))?;
        config
            .validate()
            .map_err(|err| AppError::ConfigError(err.to_string()))?;
        Ok(config)
    }

    pub fn log_filter(&self) -> &str {
        match &self.log_filter {
            Some(filter) => filter,
            None if self.debug => "debug",
            None => "info",
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
