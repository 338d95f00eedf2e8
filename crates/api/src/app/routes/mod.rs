use axum::Router;

pub mod persons;
pub mod system;

/// Router for the versioned API (mounted under [`crate::app::API_PREFIX`]).
pub fn router() -> Router {
    Router::new().nest(persons::PERSONS_PATH, persons::router())
}
