use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue, Method, header},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Access log: one line per request with method, path, status and latency.
///
/// Each request runs inside a span carrying its request id, which is also
/// echoed back in `x-request-id`.
pub async fn access_log(req: Request, next: Next) -> Response {
    let request_id = Uuid::now_v7();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let span = info_span!("request", %request_id, %method, %path);

    let started = Instant::now();
    let mut res = next.run(req).instrument(span.clone()).await;
    let latency_ms = millis(started.elapsed());

    let status = res.status().as_u16();
    span.in_scope(|| {
        if res.status().is_server_error() {
            warn!(status, latency_ms, "request finished");
        } else {
            info!(status, latency_ms, "request finished");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// CORS for browser clients: any origin, the persons verbs, JSON bodies.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION, REQUEST_ID_HEADER])
}

/// Requests running longer than `limit` are dropped (which cancels the
/// in-flight store call) and answered with 408.
pub fn timeout(limit: Duration) -> TimeoutLayer {
    TimeoutLayer::new(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latency_saturates_instead_of_wrapping() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }
}
