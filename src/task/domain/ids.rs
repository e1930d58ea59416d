//! Identifier and validated scalar types for the task domain.

use super::FieldViolation;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller-supplied unique task identifier.
///
/// The value is kept exactly as submitted; only its trimmed form is checked
/// for emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalTaskId(String);

impl ExternalTaskId {
    /// Widest value the `tasks.external_id` column accepts.
    pub const MAX_LEN: usize = 255;

    /// Creates a validated external identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolation::ExternalId`] when the value is blank and
    /// [`FieldViolation::ExternalIdTooLong`] when it exceeds
    /// [`Self::MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldViolation> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(FieldViolation::ExternalId);
        }
        if raw.chars().count() > Self::MAX_LEN {
            return Err(FieldViolation::ExternalIdTooLong);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ExternalTaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ExternalTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text task description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolation::Description`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldViolation> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(FieldViolation::Description);
        }
        Ok(Self(raw))
    }

    /// Returns the description as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Positive effort estimate in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedMinutes(u32);

impl EstimatedMinutes {
    /// Largest estimate representable in the `INTEGER` storage column.
    const MAX_PERSISTED_VALUE: i64 = i32::MAX as i64;

    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`FieldViolation::EstimatedMinutes`] when the value is zero,
    /// negative, or exceeds `i32::MAX`.
    pub fn new(value: i64) -> Result<Self, FieldViolation> {
        if value <= 0 || value > Self::MAX_PERSISTED_VALUE {
            return Err(FieldViolation::EstimatedMinutes);
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| FieldViolation::EstimatedMinutes)
    }

    /// Returns the underlying number of minutes.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EstimatedMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
