//! Task endpoint handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use mockable::Clock;

use super::{
    error::ApiError,
    routes::AppState,
    types::{CreateTaskBody, CreatedTaskBody, PendingParams, TaskBody, UpdateStatusBody},
};
use crate::task::{
    domain::PendingTaskQuery,
    ports::TaskRepository,
    services::UpdateTaskStatusRequest,
};

/// Result type for task handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// `POST /tasks`
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedTaskBody>)>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(payload) = body.map_err(|rejection| {
        ApiError::bad_request("Validation failed", vec![rejection.body_text()])
    })?;
    let task = state
        .tasks
        .create(payload.into_request())
        .await
        .map_err(|err| ApiError::from_lifecycle(err, "Failed to create task"))?;
    Ok((StatusCode::CREATED, Json(CreatedTaskBody::from(&task))))
}

/// `GET /tasks/:external_id`
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(external_id): Path<String>,
) -> ApiResult<Json<TaskBody>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state
        .tasks
        .find_by_external_id(&external_id)
        .await
        .map_err(|err| ApiError::from_lifecycle(err, "Failed to retrieve task"))?
        .ok_or_else(|| task_not_found(&external_id))?;
    Ok(Json(TaskBody::from(&task)))
}

/// `PUT /tasks/:external_id/status`
pub async fn update_task_status<R, C>(
    State(state): State<AppState<R, C>>,
    Path(external_id): Path<String>,
    body: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> ApiResult<Json<TaskBody>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let new_status = body
        .ok()
        .and_then(|Json(payload)| payload.into_new_status())
        .ok_or_else(ApiError::invalid_status)?;
    let task = state
        .tasks
        .update_status(UpdateTaskStatusRequest::new(external_id.as_str(), new_status))
        .await
        .map_err(|err| ApiError::from_lifecycle(err, "Failed to update task status"))?
        .ok_or_else(|| task_not_found(&external_id))?;
    Ok(Json(TaskBody::from(&task)))
}

/// `GET /tasks/next-to-process`
pub async fn next_to_process<R, C>(
    State(state): State<AppState<R, C>>,
) -> ApiResult<Json<TaskBody>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = state
        .tasks
        .next_to_process()
        .await
        .map_err(|err| ApiError::from_lifecycle(err, "Failed to retrieve next task"))?
        .ok_or_else(|| {
            ApiError::not_found(
                "No pending tasks found",
                "No tasks with pending status available",
            )
        })?;
    Ok(Json(TaskBody::from(&task)))
}

/// `GET /tasks/pending`
pub async fn pending_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    params: Result<Query<PendingParams>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskBody>>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(raw) = params.map_err(|rejection| {
        ApiError::bad_request("Invalid query parameters", vec![rejection.body_text()])
    })?;
    let query = PendingTaskQuery::from_params(
        raw.sort_by.as_deref(),
        raw.order.as_deref(),
        raw.limit.as_deref(),
    )
    .map_err(|errors| ApiError::bad_request("Invalid query parameters", errors.messages()))?;
    let tasks = state
        .tasks
        .pending(&query)
        .await
        .map_err(|err| ApiError::from_lifecycle(err, "Failed to retrieve pending tasks"))?;
    Ok(Json(tasks.iter().map(TaskBody::from).collect()))
}

fn task_not_found(external_id: &str) -> ApiError {
    ApiError::not_found(
        "Task not found",
        format!("Task with ID '{external_id}' does not exist"),
    )
}
