//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository wiring (Postgres or in-memory)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: error classification and consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use persons_infra::Config;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Prefix of every versioned API route.
pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<AppServices>, config: &Config) -> Router {
    let api = routes::router().layer(Extension(services));

    Router::new()
        .route("/manage/health", get(routes::system::health))
        .nest(API_PREFIX, api)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::access_log))
                .layer(middleware::cors())
                .layer(middleware::timeout(config.request_timeout)),
        )
}

pub use services::AppServices;
