use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("Invalid BIND_ADDR {0}: {1}")]
    InvalidBindAddr(String, std::net::AddrParseError),
    #[error("Invalid DB_ACQUIRE_TIMEOUT_SECS {0}")]
    InvalidAcquireTimeout(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub environment: Environment,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

pub const MAX_CONNECTIONS: u32 = 10;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        // APP_ENV wins; NODE_ENV is honoured for deployments that still set it
        let environment = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Development);

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| ConfigError::InvalidBindAddr(bind_raw.clone(), e))?;

        let acquire_timeout = match lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidAcquireTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        };

        let run_migrations = lookup("RUN_MIGRATIONS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Ok(Self {
            database_url,
            environment,
            bind_addr,
            max_connections: MAX_CONNECTIONS,
            acquire_timeout,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_requires_database_url() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));

        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/k")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_node_env_fallback_and_app_env_precedence() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/k"),
            ("NODE_ENV", "production"),
        ]))
        .unwrap();
        assert!(config.environment.is_production());

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/k"),
            ("APP_ENV", "development"),
            ("NODE_ENV", "production"),
        ]))
        .unwrap();
        assert!(!config.environment.is_production());
    }

    #[test]
    fn test_rejects_bad_values() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/k"),
            ("BIND_ADDR", "not-an-addr"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidBindAddr(_, _))));

        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/k"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidAcquireTimeout(_))));
    }
}
