//! Repository ports for task and bid persistence.
//!
//! The task port exposes a compare-and-swap update keyed on the stored
//! status; it is the serialisation primitive that makes bid acceptance
//! atomic per task. The bid port exposes an all-or-nothing batch update
//! used for the rejection cascade.

use crate::identity::domain::UserId;
use crate::marketplace::domain::{
    Bid, BidId, Category, Task, TaskId, TaskStatus, WorkerType,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Result type for bid repository operations.
pub type BidRepositoryResult<T> = Result<T, BidRepositoryError>;

/// Browse filter for task listings.
///
/// All criteria are conjunctive; an empty filter matches every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    category: Option<Category>,
    preferred_worker_type: Option<WorkerType>,
    poster_id: Option<UserId>,
}

impl TaskFilter {
    /// Creates an empty filter matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to the given lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts results to the given category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts results to the given advisory worker-type preference.
    #[must_use]
    pub const fn with_preferred_worker_type(mut self, worker_type: WorkerType) -> Self {
        self.preferred_worker_type = Some(worker_type);
        self
    }

    /// Restricts results to tasks posted by the given user.
    #[must_use]
    pub const fn with_poster(mut self, poster_id: UserId) -> Self {
        self.poster_id = Some(poster_id);
        self
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the category criterion, if any.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.category
    }

    /// Returns the worker-type criterion, if any.
    #[must_use]
    pub const fn preferred_worker_type(&self) -> Option<WorkerType> {
        self.preferred_worker_type
    }

    /// Returns the poster criterion, if any.
    #[must_use]
    pub const fn poster_id(&self) -> Option<UserId> {
        self.poster_id
    }

    /// Returns whether the task satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.category.is_none_or(|category| task.category() == Some(category))
            && self
                .preferred_worker_type
                .is_none_or(|worker_type| task.preferred_worker_type() == Some(worker_type))
            && self.poster_id.is_none_or(|poster_id| task.poster_id() == poster_id)
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task satisfying the filter, in no particular order.
    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Persists `task` only if the stored row still carries `expected`.
    ///
    /// This is the compare-and-swap primitive serialising status
    /// transitions per task: of two concurrent callers, exactly one
    /// observes `expected` and wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or [`TaskRepositoryError::StatusConflict`] when the stored
    /// status no longer equals `expected`.
    async fn update_if_status(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> TaskRepositoryResult<()>;
}

/// Bid persistence contract.
#[async_trait]
pub trait BidRepository: Send + Sync {
    /// Stores a new bid.
    ///
    /// # Errors
    ///
    /// Returns [`BidRepositoryError::DuplicateBid`] when the bid ID already
    /// exists.
    async fn store(&self, bid: &Bid) -> BidRepositoryResult<()>;

    /// Finds a bid by identifier.
    ///
    /// Returns `None` when the bid does not exist.
    async fn find_by_id(&self, id: BidId) -> BidRepositoryResult<Option<Bid>>;

    /// Returns every bid on the task, ordered by `created_at` ascending
    /// with ties broken by bid ID, so display order is deterministic.
    async fn list_for_task(&self, task_id: TaskId) -> BidRepositoryResult<Vec<Bid>>;

    /// Returns every bid submitted by the user, in no particular order.
    async fn list_for_bidder(&self, bidder_id: UserId) -> BidRepositoryResult<Vec<Bid>>;

    /// Persists changes to the given bids as a single atomic write.
    ///
    /// The acceptance/rejection cascade relies on this being
    /// all-or-nothing: either every sibling bid is resolved or none is.
    ///
    /// # Errors
    ///
    /// Returns [`BidRepositoryError::NotFound`] when any bid does not
    /// exist; in that case no bid is modified.
    async fn update_many(&self, bids: &[Bid]) -> BidRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A guarded update observed a different stored status.
    #[error("task {task_id} status changed concurrently, now {actual}")]
    StatusConflict {
        /// Task whose status changed under the caller.
        task_id: TaskId,
        /// Status observed in storage.
        actual: TaskStatus,
    },

    /// The backing store did not respond in time.
    #[error("task store operation timed out")]
    Timeout,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by bid repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BidRepositoryError {
    /// A bid with the same identifier already exists.
    #[error("duplicate bid identifier: {0}")]
    DuplicateBid(BidId),

    /// The bid was not found.
    #[error("bid not found: {0}")]
    NotFound(BidId),

    /// The backing store did not respond in time.
    #[error("bid store operation timed out")]
    Timeout,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BidRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
