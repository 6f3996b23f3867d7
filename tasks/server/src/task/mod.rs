use crate::entities::task;
use chrono::NaiveDateTime;

pub use crate::entities::sea_orm_active_enums::TaskStatus;

pub mod api;
pub mod controller;
pub mod repository;
pub mod validation;

/// Storage-assigned identifier of a task.
pub type TaskId = i64;

/// A task as read back from storage.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    created_at: NaiveDateTime,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: String,
        description: Option<String>,
        status: TaskStatus,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            created_at,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title of the task.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description of the task, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status of the task.
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the UTC time at which storage inserted the task.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id,
            model.title,
            model.description,
            model.status,
            model.created_at,
        )
    }
}

/// A validated request to create a task.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
        }
    }
}

/// A validated, partial set of changes to apply to an existing task.
///
/// `description` is doubly optional: `None` leaves it untouched while
/// `Some(None)` clears it.
#[derive(Debug, Default, PartialEq, Clone, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Returns `true` when no field would be changed.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
