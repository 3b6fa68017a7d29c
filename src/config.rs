use std::{net::SocketAddr, str::FromStr};

use thiserror::Error;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, read from the environment (and `.env` when present)
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_sql_logging: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            bind_addr: parse_or(&lookup, "BIND_ADDR", || SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", || DEFAULT_MAX_CONNECTIONS)?,
            db_min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", || DEFAULT_MIN_CONNECTIONS)?,
            db_sql_logging: parse_or(&lookup, "DB_SQL_LOGGING", || false)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default()),
    }
}
