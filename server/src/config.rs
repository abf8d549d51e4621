//! Layered configuration for the server binary.
//!
//! Sources, highest priority first:
//! 1. `TODO_API_*` environment variables (`TODO_API_BIND_ADDR`, ...)
//! 2. `DATABASE_URL`
//! 3. `todo-api.toml` in the working directory, if present
//! 4. Built-in defaults
//!
//! Pool sizing is not configurable here; see `store::postgres`.

use std::net::SocketAddr;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "todo-api.toml";
pub const ENV_PREFIX: &str = "TODO_API_";

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

const fn default_run_migrations() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("'{field}' is not configured")]
    NotConfigured { field: &'static str },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// PostgreSQL connection string.
    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Apply the embedded migrations before serving.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            bind_addr: default_bind_addr(),
            run_migrations: default_run_migrations(),
        }
    }
}

impl ServerConfig {
    /// Load from all sources and validate. Does not read `.env`.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory first, then [`ServerConfig::load`].
    /// A missing `.env` is not an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "failed to read .env");
            }
        }
        Self::load()
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }

        figment
            .merge(Env::raw().only(&["DATABASE_URL"]))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                field: "database_url",
            });
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "bind_addr",
                reason: e.to_string(),
            })
    }
}
