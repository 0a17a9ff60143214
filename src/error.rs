//! Error taxonomy for the API surface
//!
//! Every handler failure is one of these variants; the router maps them to a
//! status code and a JSON `{"message": ...}` body. Store, mail, and internal
//! failures are logged server-side and answered with a generic message.

use hyper::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Bad credential
    #[error("{0}")]
    Unauthorized(String),

    /// Missing server-side configuration (e.g. no admin password set)
    #[error("{0}")]
    Config(String),

    /// Document store failure
    #[error("Database error: {0}")]
    Database(String),

    /// Mail transport failure
    #[error("Mail error: {0}")]
    Mail(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Config(_) | ApiError::Database(_) | ApiError::Mail(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the error message is safe to return to the caller.
    ///
    /// Store/mail/internal details stay in the server log; the caller gets a
    /// route-specific generic message instead.
    pub fn is_client_safe(&self) -> bool {
        matches!(
            self,
            ApiError::Validation(_)
                | ApiError::NotFound(_)
                | ApiError::Unauthorized(_)
                | ApiError::Config(_)
        )
    }
}

/// Convenience alias for handler results
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Config("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Database("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Mail("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_client_safe() {
        assert!(ApiError::Validation("bad".into()).is_client_safe());
        assert!(ApiError::Config("no password".into()).is_client_safe());
        assert!(!ApiError::Database("connection refused".into()).is_client_safe());
        assert!(!ApiError::Mail("smtp auth failed".into()).is_client_safe());
        assert!(!ApiError::Internal("oops".into()).is_client_safe());
    }
}
