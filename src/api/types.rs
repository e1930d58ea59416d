//! Wire representations of task requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    services::CreateTaskRequest,
};

/// `POST /tasks` body.
///
/// Fields are decoded loosely so that a value of the wrong JSON type is
/// reported as a validation failure alongside every other bad field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskBody {
    /// Caller-supplied unique identifier.
    #[serde(default)]
    pub external_id: Option<Value>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<Value>,
    /// Positive effort estimate in minutes.
    #[serde(default)]
    pub estimated_minutes: Option<Value>,
}

impl CreateTaskBody {
    /// Converts the body into a service request, dropping wrongly-typed
    /// values.
    #[must_use]
    pub fn into_request(self) -> CreateTaskRequest {
        CreateTaskRequest::from_parts(
            self.external_id.and_then(into_string),
            self.description.and_then(into_string),
            self.estimated_minutes.as_ref().and_then(whole_number),
        )
    }
}

/// `PUT /tasks/:external_id/status` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusBody {
    /// Requested status name.
    #[serde(default)]
    pub new_status: Option<Value>,
}

impl UpdateStatusBody {
    /// Returns the requested status when it was sent as a string.
    #[must_use]
    pub fn into_new_status(self) -> Option<String> {
        self.new_status.and_then(into_string)
    }
}

/// `GET /tasks/pending` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingParams {
    /// `estimated_minutes` or `submitted_at`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
    /// Positive maximum number of tasks.
    pub limit: Option<String>,
}

/// Reads an integer, accepting floats such as `10.0` that carry no
/// fractional part.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.is_finite() && number.fract() == 0.0)
            .and_then(|number| format!("{number:.0}").parse().ok())
    })
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        _ => None,
    }
}

/// Full task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBody {
    /// Store-assigned identifier.
    pub internal_id: TaskId,
    /// Caller-supplied identifier.
    pub external_id: String,
    /// Free-text description.
    pub description: String,
    /// Effort estimate in minutes.
    pub estimated_minutes: u32,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

impl From<&Task> for TaskBody {
    fn from(task: &Task) -> Self {
        Self {
            internal_id: task.id(),
            external_id: task.external_id().as_str().to_owned(),
            description: task.description().as_str().to_owned(),
            estimated_minutes: task.estimated_minutes().value(),
            status: task.status(),
            submitted_at: task.submitted_at(),
        }
    }
}

/// Acknowledgement returned by `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedTaskBody {
    /// Store-assigned identifier.
    pub internal_id: TaskId,
    /// Caller-supplied identifier.
    pub external_id: String,
    /// Initial status, always `pending`.
    pub status: TaskStatus,
}

impl From<&Task> for CreatedTaskBody {
    fn from(task: &Task) -> Self {
        Self {
            internal_id: task.id(),
            external_id: task.external_id().as_str().to_owned(),
            status: task.status(),
        }
    }
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthBody {
    /// Always `OK` once the process answers.
    pub status: &'static str,
    /// Time the check ran.
    pub timestamp: DateTime<Utc>,
    /// `Connected` or `Disconnected`.
    pub database: &'static str,
}

/// Uniform error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short error kind.
    pub error: String,
    /// Human-readable explanations.
    pub details: Vec<String>,
}
