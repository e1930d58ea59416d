//! Mapping from lifecycle failures to the uniform JSON error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::types::ErrorBody;
use crate::task::{
    domain::{FieldViolation, TaskDomainError},
    ports::TaskRepositoryError,
    services::TaskLifecycleError,
};

/// Error response returned by task handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    details: Vec<String>,
}

impl ApiError {
    /// Creates an error with an explicit status, short kind and details.
    #[must_use]
    pub const fn new(status: StatusCode, kind: &'static str, details: Vec<String>) -> Self {
        Self {
            status,
            kind,
            details,
        }
    }

    /// Caller-fixable input problem.
    #[must_use]
    pub const fn bad_request(kind: &'static str, details: Vec<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, kind, details)
    }

    /// Missing resource.
    #[must_use]
    pub fn not_found(kind: &'static str, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, kind, vec![detail.into()])
    }

    /// The `new_status` field is absent or not a known status.
    #[must_use]
    pub fn invalid_status() -> Self {
        Self::bad_request(
            "Invalid status",
            vec![FieldViolation::NewStatus.message().to_owned()],
        )
    }

    /// Opaque server-side failure; `failure` says what could not be done.
    #[must_use]
    pub fn internal(failure: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            vec![failure.to_owned()],
        )
    }

    /// Converts a lifecycle failure, logging store errors instead of
    /// exposing them. `failure` is the caller-facing summary used for
    /// server-side errors.
    #[must_use]
    pub fn from_lifecycle(err: TaskLifecycleError, failure: &str) -> Self {
        match err {
            TaskLifecycleError::Domain(TaskDomainError::Validation(errors)) => {
                Self::bad_request("Validation failed", errors.messages())
            }
            TaskLifecycleError::Domain(
                transition @ TaskDomainError::InvalidStatusTransition { .. },
            ) => Self::bad_request("Invalid status transition", vec![transition.to_string()]),
            TaskLifecycleError::InvalidStatus(_) => Self::invalid_status(),
            TaskLifecycleError::Repository(
                duplicate @ TaskRepositoryError::DuplicateExternalId(_),
            ) => Self::bad_request("Task creation failed", vec![duplicate.to_string()]),
            TaskLifecycleError::Repository(TaskRepositoryError::Persistence(source)) => {
                error!(error = %source, "{failure}");
                Self::internal(failure)
            }
            contention @ TaskLifecycleError::Contention(_) => {
                Self::new(StatusCode::CONFLICT, "Conflict", vec![contention.to_string()])
            }
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the short error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the human-readable details.
    #[must_use]
    pub fn details(&self) -> &[String] {
        &self.details
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind.to_owned(),
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}
