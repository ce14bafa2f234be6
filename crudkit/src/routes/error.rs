//! API error type for the CRUD routes
//!
//! Repository and query failures collapse to one generic unprocessable
//! response at the HTTP boundary; only a delete that matched zero rows
//! gets a distinct not-found response. Internal detail is logged, the
//! client sees the `{"message": ...}` envelope.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::RepositoryError;

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The addressed entity does not exist (delete matched zero rows)
    NotFound,
    /// A repository or query-construction failure
    Unprocessable,
}

impl ApiErrorKind {
    /// HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Error surfaced by a CRUD route handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The category of error
    pub kind: ApiErrorKind,
    /// Message delivered to the client
    pub message: String,
}

impl ApiError {
    /// The addressed entity does not exist
    pub fn not_found() -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            message: "Entity not found.".to_string(),
        }
    }

    /// A request that cannot be processed
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Unprocessable,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self::unprocessable(format!("An error occurred: {err}"))
    }
}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        tracing::error!(
            kind = ?self.kind,
            status = status.as_u16(),
            "API error: {}",
            self.message
        );

        (
            status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{RepositoryError, RepositoryOperation};

    #[test]
    fn test_not_found_message_and_status() {
        let err = ApiError::not_found();
        assert_eq!(err.message, "Entity not found.");
        assert_eq!(err.kind.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unprocessable_status() {
        let err = ApiError::unprocessable("boom");
        assert_eq!(err.kind.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_from_repository_error_is_unprocessable() {
        let repo_err =
            RepositoryError::unknown_field(RepositoryOperation::Find, "nickname", "users");
        let api_err: ApiError = repo_err.into();
        assert_eq!(api_err.kind, ApiErrorKind::Unprocessable);
        assert!(api_err.message.starts_with("An error occurred:"));
        assert!(api_err.message.contains("nickname"));
    }

    #[test]
    fn test_repository_not_found_still_maps_to_unprocessable() {
        // Only delete-affected-zero-rows gets the 404 treatment; a missing
        // single-row fetch surfaces like any other repository failure.
        let repo_err = RepositoryError::not_found("User", "id eq 123");
        let api_err: ApiError = repo_err.into();
        assert_eq!(api_err.kind, ApiErrorKind::Unprocessable);
    }

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody {
            message: "Entity not found.".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"Entity not found."}"#);
    }
}
