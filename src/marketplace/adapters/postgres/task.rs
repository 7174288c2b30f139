//! `PostgreSQL` task repository.

use super::{
    models::{task_to_new_row, row_to_task, TaskRow},
    schema::tasks,
};
use crate::marketplace::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by marketplace adapters.
pub type MarketplacePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: MarketplacePgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: MarketplacePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            // Pool acquisition failures cover an unreachable or saturated
            // database, which callers treat as retryable.
            let mut connection = pool.get().map_err(|_| TaskRepositoryError::Timeout)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = *filter;
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(status) = criteria.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(category) = criteria.category() {
                query = query.filter(tasks::category.eq(category.as_str()));
            }
            if let Some(worker_type) = criteria.preferred_worker_type() {
                query = query.filter(tasks::preferred_worker_type.eq(worker_type.as_str()));
            }
            if let Some(poster_id) = criteria.poster_id() {
                query = query.filter(tasks::poster_id.eq(poster_id.into_inner()));
            }
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn update_if_status(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> TaskRepositoryResult<()> {
        let row = task_to_new_row(task);
        let task_id = task.id();

        self.run_blocking(move |connection| {
            // Guarded update: the WHERE clause on the stored status is what
            // serialises concurrent transitions on the same task.
            let updated = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::status.eq(expected.as_str())),
            )
            .set((
                tasks::status.eq(row.status),
                tasks::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if updated > 0 {
                return Ok(());
            }

            // Zero rows means the task is missing or its status moved on;
            // re-read to report which.
            let current = tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            let stored = current.ok_or(TaskRepositoryError::NotFound(task_id))?;
            let actual = TaskStatus::try_from(stored.status.as_str())
                .map_err(TaskRepositoryError::persistence)?;
            Err(TaskRepositoryError::StatusConflict { task_id, actual })
        })
        .await
    }
}
