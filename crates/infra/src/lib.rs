//! Infrastructure layer: configuration, Postgres pool, person repositories.

pub mod config;
pub mod db;
pub mod persons;

pub use config::{Config, ConfigError, SslMode};
