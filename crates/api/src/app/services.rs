//! Repository wiring.
//!
//! The Postgres pool is created here once and lives as long as the process;
//! handlers only ever see the `PersonRepository` port.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use persons_core::PersonRepository;
use persons_infra::persons::{InMemoryPersonRepository, PostgresPersonRepository};
use persons_infra::{Config, db};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppServices {
    persons: Arc<dyn PersonRepository>,
}

impl AppServices {
    pub fn new(persons: Arc<dyn PersonRepository>) -> Self {
        Self { persons }
    }

    /// Services backed by a fresh in-memory repository (dev/test).
    pub fn in_memory() -> Self {
        Self::new(InMemoryPersonRepository::arc())
    }

    pub fn persons(&self) -> &dyn PersonRepository {
        self.persons.as_ref()
    }
}

/// Build services according to `config`.
pub async fn build_services(config: &Config) -> anyhow::Result<AppServices> {
    if !config.use_persistent_stores {
        warn!("USE_PERSISTENT_STORES=false; persons are kept in memory and lost on restart");
        return Ok(AppServices::in_memory());
    }

    let pool = db::connect(config)
        .await
        .with_context(|| format!("failed to connect to postgres at {}:{}", config.postgres.host, config.postgres.port))?;
    info!("using postgres persons repository");
    Ok(AppServices::new(Arc::new(PostgresPersonRepository::new(pool))))
}
