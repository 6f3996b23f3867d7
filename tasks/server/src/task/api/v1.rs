use crate::task::controller::{TaskController, TaskError};
use crate::task::validation::{Payload, parse_payload};
use crate::task::{Task, TaskId, TaskStatus};
use crate::web::response::{ErrorBody, JsonResponse, route_not_found};
use axum::{
    Router,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, State, rejection::BytesRejection},
    http::{StatusCode, request::Parts},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Wire format of `created_at`, matching SQLite's `CURRENT_TIMESTAMP`.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Shared state of the task routes.
#[derive(Clone)]
pub struct TaskState {
    pub controller: TaskController,
}

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TaskJson {
    /// Unique identifier assigned by storage
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Insertion time in UTC
    pub created_at: String,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            status: task.status(),
            created_at: task.created_at().format(CREATED_AT_FORMAT).to_string(),
        }
    }
}

/// API response for listing all tasks.
#[derive(Debug, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<TaskJson>,
}

/// The `{id}` path segment of an item route.
///
/// Only a run of ASCII digits matches; anything else is a route miss rather
/// than an invalid ID.
#[derive(Debug)]
pub struct TaskIdSegment(String);

impl<S> FromRequestParts<S> for TaskIdSegment
where
    S: Send + Sync,
{
    type Rejection = JsonResponse<ErrorBody>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| route_not_found())?;
        if segment.is_empty() || !segment.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(route_not_found());
        }
        Ok(Self(segment))
    }
}

/// A request body decoded into a [`Payload`].
///
/// Bodies that cannot be read, including ones over the size limit, and
/// bodies that are not a JSON object are rejected with a JSON error.
#[derive(Debug)]
pub struct TaskPayload(pub Payload);

impl<S> FromRequest<S> for TaskPayload
where
    S: Send + Sync,
{
    type Rejection = JsonResponse<ErrorBody>;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(request, state)
            .await
            .map_err(unreadable_body)?;
        let payload = parse_payload(&body)
            .map_err(|err| JsonResponse::error(StatusCode::BAD_REQUEST, err.message()))?;
        Ok(Self(payload))
    }
}

fn unreadable_body(rejection: BytesRejection) -> JsonResponse<ErrorBody> {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    let status = rejection.status();
    let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "Request body is too large"
    } else {
        "Request body could not be read"
    };
    JsonResponse::error(status, message)
}

/// Handler for POST /tasks - Creates a task from a JSON body.
#[tracing::instrument(skip(state, payload))]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskPayload(payload): TaskPayload,
) -> Result<JsonResponse<TaskJson>, TaskError> {
    let task = state.controller.create(&payload).await?;
    Ok(JsonResponse::created(TaskJson::from(task)))
}

/// Handler for GET /tasks - Returns all tasks ordered by ID.
#[tracing::instrument(skip(state))]
pub async fn list_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<JsonResponse<TasksResponse>, TaskError> {
    let tasks = state.controller.list().await?;
    Ok(JsonResponse::ok(TasksResponse {
        tasks: tasks.into_iter().map(TaskJson::from).collect(),
    }))
}

/// Handler for GET /tasks/{id}.
#[tracing::instrument(skip(state))]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskIdSegment(id): TaskIdSegment,
) -> Result<JsonResponse<TaskJson>, TaskError> {
    let task = state.controller.get(&id).await?;
    Ok(JsonResponse::ok(TaskJson::from(task)))
}

/// Handler for PUT /tasks/{id} - Applies a partial update.
#[tracing::instrument(skip(state, payload))]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskIdSegment(id): TaskIdSegment,
    TaskPayload(payload): TaskPayload,
) -> Result<JsonResponse<TaskJson>, TaskError> {
    let task = state.controller.update(&id, &payload).await?;
    Ok(JsonResponse::ok(TaskJson::from(task)))
}

/// Handler for DELETE /tasks/{id}.
#[tracing::instrument(skip(state))]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskIdSegment(id): TaskIdSegment,
) -> Result<JsonResponse, TaskError> {
    state.controller.delete(&id).await?;
    Ok(JsonResponse::no_content())
}

/// Creates and returns the task router.
pub fn create_task_router(state: TaskState) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(Arc::new(state))
}
