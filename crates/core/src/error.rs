//! Domain error model.

use thiserror::Error;

/// Result type used across the persons layers.
pub type PersonResult<T> = Result<T, PersonError>;

/// Domain-level error.
///
/// Store and client-library failures are re-expressed as one of these
/// variants at the repository boundary; raw driver errors never cross it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersonError {
    /// The data store failed (connection, query, row decoding).
    #[error("db error: {0}")]
    Store(String),

    /// No person with the requested id exists.
    #[error("person not found")]
    NotFound,

    /// A person with the same identity already exists.
    ///
    /// Reserved: the current schema has no unique constraint that can raise it.
    #[error("person already exists")]
    AlreadyExists,

    /// The request could not be decoded (body, path or query parameters).
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// Tag of a [`PersonError`], without the attached context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Store,
    NotFound,
    AlreadyExists,
    MalformedRequest,
}

impl ErrorKind {
    /// All kinds, in declaration order.
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::Store,
        ErrorKind::NotFound,
        ErrorKind::AlreadyExists,
        ErrorKind::MalformedRequest,
    ];

    /// Stable machine-readable code, used in error response bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Store => "db_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::MalformedRequest => "malformed_request",
        }
    }
}

impl PersonError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PersonError::Store(_) => ErrorKind::Store,
            PersonError::NotFound => ErrorKind::NotFound,
            PersonError::AlreadyExists => ErrorKind::AlreadyExists,
            PersonError::MalformedRequest(_) => ErrorKind::MalformedRequest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ignores_context() {
        assert_eq!(PersonError::store("conn reset").kind(), ErrorKind::Store);
        assert_eq!(PersonError::store("").kind(), ErrorKind::Store);
        assert_eq!(PersonError::malformed("eof").kind(), ErrorKind::MalformedRequest);
        assert_eq!(PersonError::not_found().kind(), ErrorKind::NotFound);
        assert_eq!(PersonError::AlreadyExists.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = ErrorKind::ALL.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn display_carries_context() {
        let err = PersonError::store("connection refused");
        assert_eq!(err.to_string(), "db error: connection refused");
        assert_eq!(PersonError::NotFound.to_string(), "person not found");
    }
}
