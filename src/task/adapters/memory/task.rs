//! In-memory repository for task lifecycle tests and database-less runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{
        ExternalTaskId, PendingTaskQuery, PersistedTaskData, Task, TaskId, TaskStatus,
        TaskSubmission, processing_priority,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<ExternalTaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.tasks.len())
    }

    /// Returns `true` when no task has been stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.read()?.tasks.is_empty())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn pending_tasks(state: &InMemoryTaskState) -> impl Iterator<Item = &Task> {
    state
        .tasks
        .values()
        .filter(|task| task.status() == TaskStatus::Pending)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, submission: &TaskSubmission) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let external_id = submission.external_id();
        if state.tasks.contains_key(external_id) {
            return Err(TaskRepositoryError::DuplicateExternalId(external_id.clone()));
        }

        let task = Task::from_submission(TaskId::new(), submission.clone());
        state.tasks.insert(external_id.clone(), task.clone());
        Ok(task)
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalTaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(external_id).cloned())
    }

    async fn compare_and_set_status(
        &self,
        external_id: &ExternalTaskId,
        expected: TaskStatus,
        target: TaskStatus,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(task) = state.tasks.get_mut(external_id) else {
            return Ok(None);
        };
        if task.status() != expected {
            return Ok(None);
        }

        let data = PersistedTaskData {
            id: task.id(),
            external_id: task.external_id().clone(),
            description: task.description().clone(),
            estimated_minutes: task.estimated_minutes(),
            status: target,
            submitted_at: task.submitted_at(),
        };
        *task = Task::from_persisted(data);
        Ok(Some(task.clone()))
    }

    async fn next_pending(&self) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(pending_tasks(&state)
            .min_by(|left, right| processing_priority(left, right))
            .cloned())
    }

    async fn list_pending(&self, query: &PendingTaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = pending_tasks(&state).cloned().collect();
        tasks.sort_by(|left, right| query.compare(left, right));
        let limit = usize::try_from(query.limit().value()).unwrap_or(usize::MAX);
        tasks.truncate(limit);
        Ok(tasks)
    }

    async fn ping(&self) -> TaskRepositoryResult<()> {
        self.read().map(|_| ())
    }
}
