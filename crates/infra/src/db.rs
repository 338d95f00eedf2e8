//! Postgres connection pool bootstrap.
//!
//! The pool is created once at startup and shared for the process lifetime;
//! repositories receive a clone of it and never own its lifecycle.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::config::Config;

/// Open a connection pool and verify it with a round-trip.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pg = &config.postgres;
    let pool = PgPoolOptions::new()
        .max_connections(pg.max_connections)
        .connect_with(config.pg_connect_options())
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    info!(
        host = %pg.host,
        port = pg.port,
        database = %pg.database,
        "postgres connection pool ready"
    );
    Ok(pool)
}
