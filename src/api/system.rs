//! Service-level endpoints: health check, API index and the 404 fallback.

use axum::{Json, extract::State, http::Uri};
use mockable::Clock;
use serde_json::{Value, json};

use super::{error::ApiError, routes::AppState, types::HealthBody};
use crate::task::ports::TaskRepository;

/// `GET /health`
///
/// Always answers 200; the `database` field carries the store check result.
pub async fn health<R, C>(State(state): State<AppState<R, C>>) -> Json<HealthBody>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let connected = state.tasks.store_connected().await;
    Json(HealthBody {
        status: "OK",
        timestamp: state.tasks.now(),
        database: if connected { "Connected" } else { "Disconnected" },
    })
}

/// `GET /`
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Task Scheduler API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /tasks": "Create a new task",
            "GET /tasks/:external_id": "Get task by external ID",
            "PUT /tasks/:external_id/status": "Update task status",
            "GET /tasks/next-to-process": "Get next task to process",
            "GET /tasks/pending": "Get pending tasks with sorting and limit",
            "GET /health": "Health check endpoint",
        },
    }))
}

/// Fallback for unrouted requests.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(
        "Endpoint not found",
        format!("Path '{uri}' does not exist"),
    )
}
