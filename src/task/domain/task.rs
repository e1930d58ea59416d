//! Task aggregate root and the validated submission it is created from.

use super::{
    EstimatedMinutes, ExternalTaskId, FieldViolation, TaskDescription, TaskDomainError, TaskId,
    TaskStatus, ValidationErrors,
};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Validated task input awaiting persistence.
///
/// The store assigns the internal identifier on insert; everything else is
/// fixed here and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSubmission {
    external_id: ExternalTaskId,
    description: TaskDescription,
    estimated_minutes: EstimatedMinutes,
    submitted_at: DateTime<Utc>,
}

impl TaskSubmission {
    /// Validates raw caller input and stamps the submission time.
    ///
    /// Absent values are reported the same way as malformed ones, so wire
    /// adapters may pass `None` for fields of the wrong JSON type.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Validation`] listing every violated field.
    pub fn new(
        external_id: Option<String>,
        description: Option<String>,
        estimated_minutes: Option<i64>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let mut errors = ValidationErrors::new();
        let validated_external_id = errors.collect(
            external_id.map_or(Err(FieldViolation::ExternalId), ExternalTaskId::new),
        );
        let validated_description = errors.collect(
            description.map_or(Err(FieldViolation::Description), TaskDescription::new),
        );
        let validated_minutes = errors.collect(
            estimated_minutes.map_or(Err(FieldViolation::EstimatedMinutes), EstimatedMinutes::new),
        );

        match (validated_external_id, validated_description, validated_minutes) {
            (Some(id), Some(text), Some(minutes)) => Ok(Self {
                external_id: id,
                description: text,
                estimated_minutes: minutes,
                submitted_at: clock.utc(),
            }),
            _ => Err(TaskDomainError::Validation(errors)),
        }
    }

    /// Returns the caller-supplied identifier.
    #[must_use]
    pub const fn external_id(&self) -> &ExternalTaskId {
        &self.external_id
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the effort estimate.
    #[must_use]
    pub const fn estimated_minutes(&self) -> EstimatedMinutes {
        self.estimated_minutes
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    external_id: ExternalTaskId,
    description: TaskDescription,
    estimated_minutes: EstimatedMinutes,
    status: TaskStatus,
    submitted_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Caller-supplied identifier.
    pub external_id: ExternalTaskId,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted effort estimate.
    pub estimated_minutes: EstimatedMinutes,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl Task {
    /// Creates a freshly stored task in the `pending` status.
    #[must_use]
    pub fn from_submission(id: TaskId, submission: TaskSubmission) -> Self {
        let TaskSubmission {
            external_id,
            description,
            estimated_minutes,
            submitted_at,
        } = submission;
        Self {
            id,
            external_id,
            description,
            estimated_minutes,
            status: TaskStatus::Pending,
            submitted_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            external_id: data.external_id,
            description: data.description,
            estimated_minutes: data.estimated_minutes,
            status: data.status,
            submitted_at: data.submitted_at,
        }
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the caller-supplied identifier.
    #[must_use]
    pub const fn external_id(&self) -> &ExternalTaskId {
        &self.external_id
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the effort estimate.
    #[must_use]
    pub const fn estimated_minutes(&self) -> EstimatedMinutes {
        self.estimated_minutes
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Moves the task to `target` when the transition table allows it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] and leaves the
    /// status untouched when the edge is not in the table.
    pub fn transition_to(&mut self, target: TaskStatus) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }
}
