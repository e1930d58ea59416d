//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        EstimatedMinutes, ExternalTaskId, PendingSortKey, PendingTaskQuery, PersistedTaskData,
        SortOrder, Task, TaskDescription, TaskDomainError, TaskId, TaskStatus, TaskSubmission,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::time::Duration;
use tracing::debug;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a lazily connecting pool for `database_url`.
///
/// Connections are opened on first use, so the service can start while the
/// database is still unreachable and report it through `/health`.
#[must_use]
pub fn build_pool(database_url: &str, max_size: u32, connect_timeout: Duration) -> TaskPgPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connect_timeout)
        .build_unchecked(manager)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, submission: &TaskSubmission) -> TaskRepositoryResult<Task> {
        let external_id = submission.external_id().clone();
        let new_row = to_new_row(submission)?;

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateExternalId(external_id.clone())
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            debug!(task_id = %row.id, "inserted task row");
            row_to_task(row)
        })
        .await
    }

    async fn find_by_external_id(
        &self,
        external_id: &ExternalTaskId,
    ) -> TaskRepositoryResult<Option<Task>> {
        let lookup = external_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::external_id.eq(&lookup))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn compare_and_set_status(
        &self,
        external_id: &ExternalTaskId,
        expected: TaskStatus,
        target: TaskStatus,
    ) -> TaskRepositoryResult<Option<Task>> {
        let lookup = external_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            // Matches no row once another writer has moved the status on.
            let row = diesel::update(
                tasks::table
                    .filter(tasks::external_id.eq(&lookup))
                    .filter(tasks::status.eq(expected.as_str())),
            )
            .set(tasks::status.eq(target.as_str()))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn next_pending(&self) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .order_by((
                    tasks::estimated_minutes.asc(),
                    tasks::submitted_at.asc(),
                    tasks::external_id.asc(),
                ))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_pending(&self, query: &PendingTaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let pending_query = *query;
        self.run_blocking(move |connection| {
            let base = tasks::table
                .filter(tasks::status.eq(TaskStatus::Pending.as_str()))
                .select(TaskRow::as_select())
                .into_boxed::<diesel::pg::Pg>();
            let ordered = match (pending_query.sort_by(), pending_query.order()) {
                (PendingSortKey::EstimatedMinutes, SortOrder::Asc) => {
                    base.order_by(tasks::estimated_minutes.asc())
                }
                (PendingSortKey::EstimatedMinutes, SortOrder::Desc) => {
                    base.order_by(tasks::estimated_minutes.desc())
                }
                (PendingSortKey::SubmittedAt, SortOrder::Asc) => {
                    base.order_by(tasks::submitted_at.asc())
                }
                (PendingSortKey::SubmittedAt, SortOrder::Desc) => {
                    base.order_by(tasks::submitted_at.desc())
                }
            };
            let rows = ordered
                .then_order_by(tasks::external_id.asc())
                .limit(i64::from(pending_query.limit().value()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn ping(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            diesel::sql_query("SELECT 1")
                .execute(connection)
                .map(|_| ())
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(submission: &TaskSubmission) -> TaskRepositoryResult<NewTaskRow> {
    let estimated_minutes = i32::try_from(submission.estimated_minutes().value())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        external_id: submission.external_id().as_str().to_owned(),
        description: submission.description().as_str().to_owned(),
        estimated_minutes,
        status: TaskStatus::Pending.as_str().to_owned(),
        submitted_at: submission.submitted_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        external_id: persisted_external_id,
        description: persisted_description,
        estimated_minutes: persisted_minutes,
        status: persisted_status,
        submitted_at,
    } = row;

    let external_id = ExternalTaskId::new(persisted_external_id)
        .map_err(|violation| TaskRepositoryError::persistence(TaskDomainError::from(violation)))?;
    let description = TaskDescription::new(persisted_description)
        .map_err(|violation| TaskRepositoryError::persistence(TaskDomainError::from(violation)))?;
    let estimated_minutes = EstimatedMinutes::new(i64::from(persisted_minutes))
        .map_err(|violation| TaskRepositoryError::persistence(TaskDomainError::from(violation)))?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        external_id,
        description,
        estimated_minutes,
        status,
        submitted_at,
    }))
}
