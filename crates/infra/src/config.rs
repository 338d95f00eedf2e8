//! Configuration loading and representation.
//!
//! Everything comes from environment variables; each key has a default so a
//! bare `cargo run` against a local `db` host works.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

pub const SERVER_PORT: &str = "PORT";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

pub const PG_HOST: &str = "PG_HOST";
pub const PG_PORT: &str = "PG_PORT";
pub const PG_DB: &str = "PG_DB";
pub const PG_USER: &str = "PG_USER";
pub const PG_PASSWORD: &str = "PG_PASSWORD";
pub const PG_SSL_MODE: &str = "PG_SSL_MODE";
pub const PG_MAX_CONNECTIONS: &str = "PG_MAX_CONNECTIONS";

/// `false` switches the API to the in-memory repository (dev/test).
pub const USE_PERSISTENT_STORES: &str = "USE_PERSISTENT_STORES";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an integer, got {value:?}")]
    InvalidInteger { key: &'static str, value: String },

    #[error("{key} must be true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("unsupported PG_SSL_MODE {0:?}")]
    InvalidSslMode(String),
}

/// Validated `PG_SSL_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl FromStr for SslMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "disable" => SslMode::Disable,
            "allow" => SslMode::Allow,
            "prefer" => SslMode::Prefer,
            "require" => SslMode::Require,
            "verify-ca" => SslMode::VerifyCa,
            "verify-full" => SslMode::VerifyFull,
            _ => return Err(ConfigError::InvalidSslMode(s.to_string())),
        })
    }
}

impl From<SslMode> for PgSslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Allow => PgSslMode::Allow,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
            SslMode::VerifyCa => PgSslMode::VerifyCa,
            SslMode::VerifyFull => PgSslMode::VerifyFull,
        }
    }
}

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub ssl_mode: SslMode,
    pub max_connections: u32,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "db".to_string(),
            port: 5432,
            database: "persons_db".to_string(),
            user: "program".to_string(),
            password: "test".to_string(),
            ssl_mode: SslMode::Disable,
            max_connections: 10,
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_port: u16,
    /// Upper bound on a single request, store round-trips included.
    pub request_timeout: Duration,
    pub use_persistent_stores: bool,
    pub postgres: PostgresConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            request_timeout: Duration::from_secs(30),
            use_persistent_stores: true,
            postgres: PostgresConfig::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// missing or empty keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let ssl_mode = match get(PG_SSL_MODE) {
            Some(raw) => raw.parse()?,
            None => defaults.postgres.ssl_mode,
        };

        let postgres = PostgresConfig {
            host: get(PG_HOST).unwrap_or(defaults.postgres.host),
            port: parse_int(PG_PORT, get(PG_PORT), defaults.postgres.port)?,
            database: get(PG_DB).unwrap_or(defaults.postgres.database),
            user: get(PG_USER).unwrap_or(defaults.postgres.user),
            password: get(PG_PASSWORD).unwrap_or(defaults.postgres.password),
            ssl_mode,
            max_connections: parse_int(
                PG_MAX_CONNECTIONS,
                get(PG_MAX_CONNECTIONS),
                defaults.postgres.max_connections,
            )?,
        };

        Ok(Config {
            server_port: parse_int(SERVER_PORT, get(SERVER_PORT), defaults.server_port)?,
            request_timeout: Duration::from_secs(parse_int(
                REQUEST_TIMEOUT_SECS,
                get(REQUEST_TIMEOUT_SECS),
                defaults.request_timeout.as_secs(),
            )?),
            use_persistent_stores: parse_bool(
                USE_PERSISTENT_STORES,
                get(USE_PERSISTENT_STORES),
                defaults.use_persistent_stores,
            )?,
            postgres,
        })
    }

    /// sqlx connect options for the configured database.
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        let pg = &self.postgres;
        PgConnectOptions::new()
            .host(&pg.host)
            .port(pg.port)
            .database(&pg.database)
            .username(&pg.user)
            .password(&pg.password)
            .ssl_mode(pg.ssl_mode.into())
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.server_port)
    }
}

fn parse_int<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidInteger { key, value }),
    }
}

fn parse_bool(key: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value }),
    }
}
