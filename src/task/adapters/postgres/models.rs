//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: uuid::Uuid,
    /// Caller-supplied identifier.
    pub external_id: String,
    /// Free-text description.
    pub description: String,
    /// Effort estimate in minutes.
    pub estimated_minutes: i32,
    /// Lifecycle status.
    pub status: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

/// Insert model for task records; `id` comes from the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Caller-supplied identifier.
    pub external_id: String,
    /// Free-text description.
    pub description: String,
    /// Effort estimate in minutes.
    pub estimated_minutes: i32,
    /// Initial lifecycle status.
    pub status: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}
