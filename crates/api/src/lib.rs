//! HTTP API: routing, request/response mapping and error classification for
//! the persons service.

pub mod app;
pub mod middleware;
