//! Persistence of tasks in a relational store.
//!
//! Every operation runs inside its own transaction. Changes are committed
//! before the operation returns; on any error the transaction is dropped,
//! which rolls it back.

use crate::entities::task;
use crate::task::{NewTask, Task, TaskChanges, TaskId, TaskStatus};
use async_trait::async_trait;
use sea_orm::sea_query::{ColumnDef, Expr, Table};
use sea_orm::*;

/// Error type for TaskRepository operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskRepositoryError {
    /// Represents a connection, I/O or constraint failure in the database.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Storage operations for tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Ensures the task table exists. Safe to call on every start.
    async fn init(&self) -> Result<(), TaskRepositoryError>;

    /// Inserts a task and returns it with its assigned ID and timestamp.
    async fn create(&self, new_task: NewTask) -> Result<Task, TaskRepositoryError>;

    /// Returns every task ordered by ascending ID.
    async fn find_all(&self) -> Result<Vec<Task>, TaskRepositoryError>;

    /// Returns the task with the given ID, or `None` if there is none.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError>;

    /// Applies `changes` to the task with the given ID.
    ///
    /// Returns `None` if the task does not exist. An empty set of changes
    /// leaves the task untouched and returns it as is.
    async fn update(
        &self,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError>;

    /// Removes the task with the given ID. Returns `false` if there was none.
    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError>;

    /// Returns `true` if a task with the given ID exists.
    async fn exists(&self, id: TaskId) -> Result<bool, TaskRepositoryError>;
}

/// [`TaskRepository`] backed by a `SeaORM` connection.
pub struct SeaOrmTaskRepository {
    db: DatabaseConnection,
}

impl SeaOrmTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a single-connection pool to the database at `database_url`.
    #[tracing::instrument]
    pub async fn connect(database_url: &str) -> Result<Self, TaskRepositoryError> {
        let mut options = ConnectOptions::new(database_url);
        options.max_connections(1).min_connections(1);
        let db = Database::connect(options).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl TaskRepository for SeaOrmTaskRepository {
    #[tracing::instrument(skip(self))]
    async fn init(&self) -> Result<(), TaskRepositoryError> {
        let statement = Table::create()
            .table(task::Entity.table_ref())
            .if_not_exists()
            // A plain `integer` primary key is SQLite's 64-bit rowid.
            .col(
                ColumnDef::new(task::Column::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(task::Column::Title).text().not_null())
            .col(ColumnDef::new(task::Column::Description).text().null())
            .col(
                ColumnDef::new(task::Column::Status)
                    .text()
                    .not_null()
                    .default(TaskStatus::Pending.as_str()),
            )
            .col(
                ColumnDef::new(task::Column::CreatedAt)
                    .timestamp()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned();

        let txn = self.db.begin().await?;
        let backend = txn.get_database_backend();
        txn.execute(backend.build(&statement)).await?;
        txn.commit().await?;
        tracing::info!("Task table is ready");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, new_task: NewTask) -> Result<Task, TaskRepositoryError> {
        let txn = self.db.begin().await?;
        let active_model = task::ActiveModel {
            title: ActiveValue::Set(new_task.title),
            description: ActiveValue::Set(new_task.description),
            status: ActiveValue::Set(new_task.status),
            ..Default::default()
        };
        let created_model = active_model.insert(&txn).await?;
        txn.commit().await?;
        Ok(Task::from(created_model))
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Task>, TaskRepositoryError> {
        let txn = self.db.begin().await?;
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(&txn)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        txn.commit().await?;
        Ok(tasks)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, TaskRepositoryError> {
        let txn = self.db.begin().await?;
        let task_model = task::Entity::find_by_id(id).one(&txn).await?;
        txn.commit().await?;
        Ok(task_model.map(Task::from))
    }

    #[tracing::instrument(skip(self))]
    async fn update(
        &self,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Option<Task>, TaskRepositoryError> {
        let txn = self.db.begin().await?;
        let Some(task_to_update) = task::Entity::find_by_id(id).one(&txn).await? else {
            txn.commit().await?;
            return Ok(None);
        };

        if changes.is_empty() {
            txn.commit().await?;
            return Ok(Some(Task::from(task_to_update)));
        }

        let mut active_model: task::ActiveModel = task_to_update.into();
        if let Some(title) = changes.title {
            active_model.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            active_model.description = ActiveValue::Set(description);
        }
        if let Some(status) = changes.status {
            active_model.status = ActiveValue::Set(status);
        }
        let updated_model = active_model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(Task::from(updated_model)))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        let txn = self.db.begin().await?;
        let result = task::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, id: TaskId) -> Result<bool, TaskRepositoryError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
