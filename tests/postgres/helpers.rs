//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, TemporaryDatabase, postgres_cluster};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use tasklane::task::adapters::postgres::{PostgresTaskRepository, TaskPgPool};
use uuid::Uuid;

/// SQL creating the `tasks` table and its priority index.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-01-05-000000_create_tasks/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "tasklane_test_template";

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster.ensure_template_exists(TEMPLATE_DB, apply_migrations)
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url).map_err(|err| Box::new(err) as BoxError)?;
    conn.batch_execute(CREATE_TASKS_SQL)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

/// Creates a database from the template and a repository over it.
///
/// # Errors
///
/// Returns an error if database creation or pool construction fails.
pub fn setup_repository(
    cluster: PostgresCluster,
) -> Result<(TemporaryDatabase, PostgresTaskRepository), BoxError> {
    let temp_db = cluster
        .temporary_database_from_template(&format!("task_{}", Uuid::new_v4().simple()), TEMPLATE_DB)?;

    let manager = ConnectionManager::<PgConnection>::new(temp_db.url());
    let pool: TaskPgPool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;

    Ok((temp_db, PostgresTaskRepository::new(pool)))
}
