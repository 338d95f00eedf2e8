use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use persons_api::app::{build_app, services};
use persons_infra::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    persons_observability::init();

    let config = Config::from_env().context("failed to read configuration")?;
    info!("persons API starting");

    let services = services::build_services(&config).await?;
    let app = build_app(Arc::new(services), &config);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %listener.local_addr()?, "persons API started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("persons API server failed")?;

    info!("persons API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
