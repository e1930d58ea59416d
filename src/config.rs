//! Process configuration read from environment variables.
//!
//! - `HOST` - Optional. Bind address. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Bind port. Defaults to `3000`.
//! - `DATABASE_URL` - Optional. Postgres connection string. When unset the
//!   service keeps tasks in memory.
//! - `DATABASE_POOL_SIZE` - Optional. Maximum pooled connections. Defaults
//!   to `8`.
//! - `DATABASE_CONNECT_TIMEOUT_SECS` - Optional. Seconds to wait for a
//!   pooled connection. Defaults to `5`.

use std::{str::FromStr, time::Duration};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Postgres settings, present only when `DATABASE_URL` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection string.
    pub url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long to wait for a pooled connection.
    pub connect_timeout: Duration,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Persistent store settings; `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable does not
    /// parse or the pool size is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_or("PORT", read("PORT"), DEFAULT_PORT)?;

        let database = read("DATABASE_URL")
            .map(|url| database_config(url, &read))
            .transpose()?;

        Ok(Self {
            host,
            port,
            database,
        })
    }

    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn database_config(
    url: String,
    read: &impl Fn(&str) -> Option<String>,
) -> Result<DatabaseConfig, ConfigError> {
    let pool_size = parse_or("DATABASE_POOL_SIZE", read("DATABASE_POOL_SIZE"), DEFAULT_POOL_SIZE)?;
    if pool_size == 0 {
        return Err(ConfigError::InvalidValue {
            name: "DATABASE_POOL_SIZE",
            reason: "must be greater than zero".to_owned(),
        });
    }
    let timeout_secs = parse_or(
        "DATABASE_CONNECT_TIMEOUT_SECS",
        read("DATABASE_CONNECT_TIMEOUT_SECS"),
        DEFAULT_CONNECT_TIMEOUT_SECS,
    )?;
    Ok(DatabaseConfig {
        url,
        pool_size,
        connect_timeout: Duration::from_secs(timeout_secs),
    })
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|err: T::Err| ConfigError::InvalidValue {
                name,
                reason: err.to_string(),
            })
    })
}
