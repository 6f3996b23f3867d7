use crate::task::repository::{TaskRepository, TaskRepositoryError};
use crate::task::validation::{self, Payload, ValidationError};
use crate::task::{Task, TaskId};
use crate::web::response::JsonResponse;
use axum::http::StatusCode;
use std::sync::Arc;

/// Error type for task operations, mapped onto HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The request was malformed. Reported to the client as is.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No task has the requested ID.
    #[error("Task with ID {0} not found")]
    NotFound(TaskId),
    /// Storage failed. Details are logged and never sent to the client.
    #[error("Storage error: {0}")]
    Storage(#[from] TaskRepositoryError),
}

impl axum::response::IntoResponse for TaskError {
    fn into_response(self) -> axum::response::Response {
        match self {
            TaskError::Validation(error) => {
                JsonResponse::error(StatusCode::BAD_REQUEST, error.message()).into_response()
            }
            TaskError::NotFound(_) => {
                JsonResponse::error(StatusCode::NOT_FOUND, "Task not found").into_response()
            }
            TaskError::Storage(error) => {
                tracing::error!("Task storage operation failed: {}", error);
                JsonResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .into_response()
            }
        }
    }
}

/// Business operations on tasks: validate, then delegate to storage.
#[derive(Clone)]
pub struct TaskController {
    repository: Arc<dyn TaskRepository>,
}

impl TaskController {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    /// Validates `payload` and stores a new task.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, payload: &Payload) -> Result<Task, TaskError> {
        let new_task = validation::validate_create(payload)?;
        let task = self.repository.create(new_task).await?;
        tracing::info!("Created task {}", task.id());
        Ok(task)
    }

    /// Lists every task ordered by ID.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.repository.find_all().await?)
    }

    /// Fetches a single task by its raw path identifier.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, raw_id: &str) -> Result<Task, TaskError> {
        let id = validation::validate_id(raw_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Applies the fields present in `payload` to an existing task.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, raw_id: &str, payload: &Payload) -> Result<Task, TaskError> {
        let id = validation::validate_id(raw_id)?;
        let changes = validation::validate_update(payload)?;
        let task = self
            .repository
            .update(id, changes)
            .await?
            .ok_or(TaskError::NotFound(id))?;
        tracing::info!("Updated task {}", id);
        Ok(task)
    }

    /// Permanently removes a task.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<(), TaskError> {
        let id = validation::validate_id(raw_id)?;
        if !self.repository.delete(id).await? {
            return Err(TaskError::NotFound(id));
        }
        tracing::info!("Deleted task {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::repository::MockTaskRepository;
    use crate::task::{NewTask, TaskChanges, TaskStatus};
    use axum::response::IntoResponse;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_task(id: TaskId, title: &str) -> Task {
        let created_at = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        Task::new(id, title.to_string(), None, TaskStatus::Pending, created_at)
    }

    fn storage_failure() -> TaskRepositoryError {
        TaskRepositoryError::Database(sea_orm::DbErr::Custom("disk I/O error".to_string()))
    }

    fn payload(value: serde_json::Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn create_passes_validated_task_to_storage() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_create()
            .withf(|new_task| *new_task == NewTask::new("Buy milk"))
            .times(1)
            .returning(|new_task| Ok(sample_task(1, &new_task.title)));
        let controller = TaskController::new(Arc::new(repository));

        let task = controller
            .create(&payload(json!({"title": "Buy milk"})))
            .await
            .unwrap();

        assert_eq!(task, sample_task(1, "Buy milk"));
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_without_touching_storage() {
        let mut repository = MockTaskRepository::new();
        repository.expect_create().never();
        let controller = TaskController::new(Arc::new(repository));

        let result = controller.create(&payload(json!({"title": ""}))).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn get_reports_missing_task_as_not_found() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == 999)
            .returning(|_| Ok(None));
        let controller = TaskController::new(Arc::new(repository));

        let result = controller.get("999").await;

        assert!(matches!(result, Err(TaskError::NotFound(999))));
    }

    #[tokio::test]
    async fn get_rejects_zero_id_before_storage() {
        let mut repository = MockTaskRepository::new();
        repository.expect_find_by_id().never();
        let controller = TaskController::new(Arc::new(repository));

        let result = controller.get("0").await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn update_rejects_payload_without_known_fields() {
        let mut repository = MockTaskRepository::new();
        repository.expect_update().never();
        let controller = TaskController::new(Arc::new(repository));

        let result = controller.update("1", &payload(json!({"foo": "bar"}))).await;

        assert!(matches!(result, Err(TaskError::Validation(_))));
    }

    #[tokio::test]
    async fn update_forwards_only_supplied_fields() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_update()
            .withf(|id, changes| {
                *id == 7
                    && *changes
                        == TaskChanges {
                            status: Some(TaskStatus::Completed),
                            ..Default::default()
                        }
            })
            .returning(|id, _| Ok(Some(sample_task(id, "Unchanged"))));
        let controller = TaskController::new(Arc::new(repository));

        let task = controller
            .update("7", &payload(json!({"status": "completed"})))
            .await
            .unwrap();

        assert_eq!(task.id(), 7);
    }

    #[tokio::test]
    async fn delete_reports_missing_task_as_not_found() {
        let mut repository = MockTaskRepository::new();
        repository.expect_delete().returning(|_| Ok(false));
        let controller = TaskController::new(Arc::new(repository));

        let result = controller.delete("3").await;

        assert!(matches!(result, Err(TaskError::NotFound(3))));
    }

    #[tokio::test]
    async fn storage_failure_becomes_generic_internal_server_error() {
        let mut repository = MockTaskRepository::new();
        repository
            .expect_find_all()
            .returning(|| Err(storage_failure()));
        let controller = TaskController::new(Arc::new(repository));

        let error = controller.list().await.unwrap_err();
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn not_found_error_uses_json_error_body() {
        let response = TaskError::NotFound(42).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"error": "Task not found"}));
    }
}
