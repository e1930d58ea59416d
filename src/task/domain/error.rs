//! Error types for task domain validation and parsing.

use super::TaskStatus;
use std::fmt;
use thiserror::Error;

/// A single caller-fixable problem with submitted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldViolation {
    /// The external identifier is missing, not a string, or blank.
    ExternalId,
    /// The external identifier exceeds the storage column width.
    ExternalIdTooLong,
    /// The description is missing, not a string, or blank.
    Description,
    /// The estimate is missing, not an integer, or not positive.
    EstimatedMinutes,
    /// The requested status is not a known task status.
    NewStatus,
    /// The pending-list sort key is unsupported.
    SortBy,
    /// The pending-list sort direction is unsupported.
    Order,
    /// The pending-list limit is not a positive integer.
    Limit,
}

impl FieldViolation {
    /// Returns the wire name of the offending field.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ExternalId | Self::ExternalIdTooLong => "external_id",
            Self::Description => "description",
            Self::EstimatedMinutes => "estimated_minutes",
            Self::NewStatus => "new_status",
            Self::SortBy => "sort_by",
            Self::Order => "order",
            Self::Limit => "limit",
        }
    }

    /// Returns the human-readable explanation shown to callers.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ExternalId => "external_id is required and must be a non-empty string",
            Self::ExternalIdTooLong => "external_id must be at most 255 characters",
            Self::Description => "description is required and must be a non-empty string",
            Self::EstimatedMinutes => {
                "estimated_minutes is required and must be a positive integer"
            }
            Self::NewStatus => "new_status must be one of: pending, processing, completed",
            Self::SortBy => "sort_by must be either \"estimated_minutes\" or \"submitted_at\"",
            Self::Order => "order must be either \"asc\" or \"desc\"",
            Self::Limit => "limit must be a positive integer",
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// All field violations collected while validating one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", self.messages().join("; "))]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Creates an empty violation list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Records a violation.
    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Records the error side of `result` and returns its success value.
    pub fn collect<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.push(violation);
                None
            }
        }
    }

    /// Returns `true` when no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the recorded violations in discovery order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Returns the caller-facing messages in discovery order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<FieldViolation> for ValidationErrors {
    fn from(violation: FieldViolation) -> Self {
        Self(vec![violation])
    }
}

/// Errors returned by task domain rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// One or more input fields failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The status machine does not permit the requested change.
    #[error("invalid status transition from '{from}' to '{to}'")]
    InvalidStatusTransition {
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller asked for.
        to: TaskStatus,
    },
}

impl From<ValidationErrors> for TaskDomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<FieldViolation> for TaskDomainError {
    fn from(violation: FieldViolation) -> Self {
        Self::Validation(violation.into())
    }
}

/// Error returned while parsing task statuses from callers or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
