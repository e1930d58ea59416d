//! Repository port for task persistence and pending-set queries.

use crate::task::domain::{ExternalTaskId, PendingTaskQuery, Task, TaskStatus, TaskSubmission};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a validated submission and returns the persisted task with its
    /// store-assigned identifier and `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateExternalId`] when a task with
    /// the same external identifier already exists. The store is left
    /// unchanged in that case.
    async fn insert(&self, submission: &TaskSubmission) -> TaskRepositoryResult<Task>;

    /// Finds a task by its external identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalTaskId,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Atomically sets the status to `target` only while it still equals
    /// `expected`.
    ///
    /// Returns the updated task, or `None` when the task is gone or its
    /// status no longer equals `expected`.
    async fn compare_and_set_status(
        &self,
        external_id: &ExternalTaskId,
        expected: TaskStatus,
        target: TaskStatus,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the pending task with the highest processing priority.
    ///
    /// Priority follows [`crate::task::domain::processing_priority`].
    async fn next_pending(&self) -> TaskRepositoryResult<Option<Task>>;

    /// Returns pending tasks ordered and capped as `query` describes.
    async fn list_pending(&self, query: &PendingTaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same external identifier already exists.
    #[error("task with external id '{0}' already exists")]
    DuplicateExternalId(ExternalTaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
