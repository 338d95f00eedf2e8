//! Error classification and consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, error};

use persons_core::{ErrorKind, PersonError};

/// Transport status for a domain error kind.
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::MalformedRequest => StatusCode::BAD_REQUEST,
    }
}

/// Innermost `PersonError` in the chain, ignoring any context layered on top.
pub fn root_person_error(err: &anyhow::Error) -> Option<&PersonError> {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<PersonError>())
        .last()
}

/// Status for an arbitrary error; anything outside the domain taxonomy is a 500.
pub fn classify(err: &anyhow::Error) -> StatusCode {
    root_person_error(err)
        .map(|e| status_for(e.kind()))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Handler error: any error, rendered through [`classify`].
#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = classify(&self.0);
        let domain = root_person_error(&self.0);

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %format!("{:#}", self.0), "request failed");
        } else {
            debug!(status = status.as_u16(), error = %format!("{:#}", self.0), "request rejected");
        }

        match domain {
            // Store detail stays in the logs.
            Some(e @ PersonError::Store(_)) => json_error(status, e.kind().code(), "db error"),
            Some(e) => json_error(status, e.kind().code(), e.to_string()),
            None => json_error(status, "internal_error", "internal server error"),
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn every_kind_has_its_status() {
        assert_eq!(status_for(ErrorKind::Store), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::AlreadyExists), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorKind::MalformedRequest), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn classification_is_deterministic() {
        for kind in ErrorKind::ALL {
            let first = status_for(kind);
            for _ in 0..3 {
                assert_eq!(status_for(kind), first);
            }
        }
    }

    #[test]
    fn context_is_ignored() {
        let err = Err::<(), _>(PersonError::NotFound)
            .context("loading person 7")
            .context("handling GET")
            .unwrap_err();
        assert_eq!(classify(&err), StatusCode::NOT_FOUND);
        assert_eq!(root_person_error(&err), Some(&PersonError::NotFound));
    }

    #[test]
    fn store_detail_does_not_change_status() {
        let a = anyhow::Error::new(PersonError::store("connection refused"));
        let b = anyhow::Error::new(PersonError::store("syntax error at or near"));
        assert_eq!(classify(&a), classify(&b));
        assert_eq!(classify(&a), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn foreign_errors_default_to_500() {
        let err = anyhow::anyhow!("something unexpected");
        assert_eq!(classify(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(root_person_error(&err), None);
    }

    #[test]
    fn response_uses_kind_code() {
        let res = ApiError::from(PersonError::malformed("expected value")).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
