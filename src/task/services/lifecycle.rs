//! Service layer for task submission, lookup, status changes, and pending
//! work selection.

use crate::task::{
    domain::{
        ExternalTaskId, ParseTaskStatusError, PendingTaskQuery, Task, TaskDomainError,
        TaskStatus, TaskSubmission,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// How many read-validate-swap rounds a status update attempts before
/// reporting contention.
const STATUS_UPDATE_ATTEMPTS: usize = 3;

/// Request payload for submitting a task.
///
/// Fields are optional so that wire adapters can forward absent or
/// wrongly-typed values and still get every violation reported at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    external_id: Option<String>,
    description: Option<String>,
    estimated_minutes: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with every field present.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        description: impl Into<String>,
        estimated_minutes: i64,
    ) -> Self {
        Self {
            external_id: Some(external_id.into()),
            description: Some(description.into()),
            estimated_minutes: Some(estimated_minutes),
        }
    }

    /// Creates a request from possibly missing fields.
    #[must_use]
    pub const fn from_parts(
        external_id: Option<String>,
        description: Option<String>,
        estimated_minutes: Option<i64>,
    ) -> Self {
        Self {
            external_id,
            description,
            estimated_minutes,
        }
    }
}

/// Request payload for changing a task's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    external_id: String,
    new_status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a status change request from raw caller values.
    #[must_use]
    pub fn new(external_id: impl Into<String>, new_status: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            new_status: new_status.into(),
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a status-machine rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested status is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Concurrent writers kept changing the status underneath the update.
    #[error("status of task '{0}' kept changing concurrently; retry the update")]
    Contention(ExternalTaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates and stores a new task in the `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] listing every invalid field, or
    /// [`TaskLifecycleError::Repository`] when the external identifier is
    /// taken or persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let submission = TaskSubmission::new(
            request.external_id,
            request.description,
            request.estimated_minutes,
            &*self.clock,
        )?;
        let task = self.repository.insert(&submission).await?;
        info!(
            external_id = %task.external_id(),
            task_id = %task.id(),
            estimated_minutes = task.estimated_minutes().value(),
            "task created"
        );
        Ok(task)
    }

    /// Retrieves a task by its external identifier.
    ///
    /// Returns `Ok(None)` when no such task exists, including identifiers
    /// that could never have been stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> TaskLifecycleResult<Option<Task>> {
        let Ok(lookup) = ExternalTaskId::new(external_id) else {
            return Ok(None);
        };
        Ok(self.repository.find_by_external_id(&lookup).await?)
    }

    /// Moves a task to a new status when the transition table allows it.
    ///
    /// The stored status is swapped only if it still matches the status the
    /// transition was validated against; otherwise the task is re-read and
    /// the transition re-validated.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown status names,
    /// [`TaskLifecycleError::Domain`] for disallowed transitions,
    /// [`TaskLifecycleError::Contention`] when the status keeps changing
    /// concurrently, or [`TaskLifecycleError::Repository`] on persistence
    /// failure.
    pub async fn update_status(
        &self,
        request: UpdateTaskStatusRequest,
    ) -> TaskLifecycleResult<Option<Task>> {
        let target = TaskStatus::try_from(request.new_status.as_str())?;
        let Ok(external_id) = ExternalTaskId::new(request.external_id) else {
            return Ok(None);
        };

        for _ in 0..STATUS_UPDATE_ATTEMPTS {
            let Some(mut task) = self.repository.find_by_external_id(&external_id).await? else {
                return Ok(None);
            };
            let current = task.status();
            if let Err(err) = task.transition_to(target) {
                warn!(
                    external_id = %external_id,
                    from = %current,
                    to = %target,
                    "rejected status transition"
                );
                return Err(err.into());
            }

            if let Some(updated) = self
                .repository
                .compare_and_set_status(&external_id, current, target)
                .await?
            {
                info!(
                    external_id = %external_id,
                    from = %current,
                    to = %target,
                    "task status updated"
                );
                return Ok(Some(updated));
            }
        }

        warn!(
            external_id = %external_id,
            "status update lost every compare-and-swap round"
        );
        Err(TaskLifecycleError::Contention(external_id))
    }

    /// Returns the pending task that should be processed next.
    ///
    /// Shortest estimate wins; ties go to the earliest submission. The task
    /// is not claimed: callers move it to `processing` with
    /// [`Self::update_status`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn next_to_process(&self) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.next_pending().await?)
    }

    /// Lists pending tasks ordered and capped as `query` describes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn pending(&self, query: &PendingTaskQuery) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_pending(query).await?)
    }

    /// Returns the current time as seen by the service clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Reports whether the backing store answers a connectivity check.
    pub async fn store_connected(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "task store connectivity check failed");
                false
            }
        }
    }
}
