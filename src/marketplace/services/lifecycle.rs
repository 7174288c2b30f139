//! Service layer coupling task and bid state.
//!
//! The service enforces every cross-entity rule: bid-submission
//! eligibility, the poster-only single-acceptance transition with its
//! rejection cascade, and explicit cancellation and completion. Caller
//! identity is always an explicit parameter; the service never reads
//! ambient session state.

use crate::identity::domain::UserId;
use crate::marketplace::{
    domain::{
        Amount, Bid, BidId, BidStatus, BidTerms, BudgetRange, Category, MarketplaceDomainError,
        Task, TaskDetails, TaskId, TaskStatus, WorkerType,
    },
    ports::{
        BidRepository, BidRepositoryError, TaskFilter, TaskRepository, TaskRepositoryError,
    },
};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for posting a new task.
///
/// Monetary bounds are minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTaskRequest {
    title: String,
    description: String,
    budget_min_cents: i64,
    budget_max_cents: i64,
    category: Option<Category>,
    preferred_worker_type: Option<WorkerType>,
    deadline: Option<NaiveDate>,
}

impl PostTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        budget_min_cents: i64,
        budget_max_cents: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            budget_min_cents,
            budget_max_cents,
            category: None,
            preferred_worker_type: None,
            deadline: None,
        }
    }

    /// Sets the category tag.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the advisory worker-type preference.
    #[must_use]
    pub const fn with_preferred_worker_type(mut self, worker_type: WorkerType) -> Self {
        self.preferred_worker_type = Some(worker_type);
        self
    }

    /// Sets the informational deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Request payload for submitting a bid on a task.
///
/// The amount is minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitBidRequest {
    amount_cents: i64,
    proposal: String,
    estimated_hours: Option<u32>,
    estimated_completion: Option<NaiveDate>,
}

impl SubmitBidRequest {
    /// Creates a request with required bid fields.
    #[must_use]
    pub fn new(amount_cents: i64, proposal: impl Into<String>) -> Self {
        Self {
            amount_cents,
            proposal: proposal.into(),
            estimated_hours: None,
            estimated_completion: None,
        }
    }

    /// Sets the estimated effort in whole hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the estimated completion date.
    #[must_use]
    pub const fn with_estimated_completion(mut self, date: NaiveDate) -> Self {
        self.estimated_completion = Some(date);
        self
    }
}

/// Coarse classification of a lifecycle failure, driving caller recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input; fix the request and retry.
    Validation,
    /// The caller lacks authority for the action; not retryable.
    Forbidden,
    /// State changed concurrently; reload before retrying.
    Conflict,
    /// A referenced entity is missing; not retryable.
    NotFound,
    /// Transient infrastructure failure; retryable with backoff.
    Timeout,
    /// Unexpected persistence fault; surface to the operator.
    Internal,
}

impl ErrorKind {
    /// Returns whether a blind retry of the same call can succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Service-level errors for marketplace lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] MarketplaceDomainError),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced bid does not exist or belongs to another task.
    #[error("bid not found: {0}")]
    BidNotFound(BidId),

    /// Only the task poster may perform this action.
    #[error("user {user_id} is not the poster of task {task_id}")]
    NotTaskPoster {
        /// Task being acted on.
        task_id: TaskId,
        /// Caller identity.
        user_id: UserId,
    },

    /// Posters cannot bid on their own tasks.
    #[error("user {bidder_id} cannot bid on their own task {task_id}")]
    SelfBid {
        /// Task being bid on.
        task_id: TaskId,
        /// Caller identity.
        bidder_id: UserId,
    },

    /// The task is no longer accepting bids.
    #[error("task {task_id} is {status} and not accepting bids")]
    TaskClosedForBids {
        /// Task being bid on.
        task_id: TaskId,
        /// Observed task status.
        status: TaskStatus,
    },

    /// The task left the open state before the transition could apply.
    #[error("task {task_id} is {status}, expected {}", TaskStatus::Open)]
    TaskNotOpen {
        /// Task being acted on.
        task_id: TaskId,
        /// Observed task status.
        status: TaskStatus,
    },

    /// The task is not in progress, so it cannot be completed.
    #[error("task {task_id} is {status}, expected {}", TaskStatus::InProgress)]
    TaskNotInProgress {
        /// Task being acted on.
        task_id: TaskId,
        /// Observed task status.
        status: TaskStatus,
    },

    /// The bid was already resolved.
    #[error("bid {bid_id} is {status}, expected {}", BidStatus::Pending)]
    BidNotPending {
        /// Bid being acted on.
        bid_id: BidId,
        /// Observed bid status.
        status: BidStatus,
    },

    /// A backing store did not respond in time.
    #[error("store operation timed out")]
    Timeout,

    /// Task store failure outside the lifecycle taxonomy.
    #[error(transparent)]
    TaskStore(TaskRepositoryError),

    /// Bid store failure outside the lifecycle taxonomy.
    #[error(transparent)]
    BidStore(BidRepositoryError),
}

impl LifecycleError {
    /// Classifies the error for caller recovery decisions.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::TaskNotFound(_) | Self::BidNotFound(_) => ErrorKind::NotFound,
            Self::NotTaskPoster { .. }
            | Self::SelfBid { .. }
            | Self::TaskClosedForBids { .. } => ErrorKind::Forbidden,
            Self::TaskNotOpen { .. }
            | Self::TaskNotInProgress { .. }
            | Self::BidNotPending { .. } => ErrorKind::Conflict,
            Self::Timeout => ErrorKind::Timeout,
            Self::TaskStore(_) | Self::BidStore(_) => ErrorKind::Internal,
        }
    }
}

impl From<TaskRepositoryError> for LifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::TaskNotFound(task_id),
            TaskRepositoryError::StatusConflict { task_id, actual } => Self::TaskNotOpen {
                task_id,
                status: actual,
            },
            TaskRepositoryError::Timeout => Self::Timeout,
            other => Self::TaskStore(other),
        }
    }
}

impl From<BidRepositoryError> for LifecycleError {
    fn from(err: BidRepositoryError) -> Self {
        match err {
            BidRepositoryError::NotFound(bid_id) => Self::BidNotFound(bid_id),
            BidRepositoryError::Timeout => Self::Timeout,
            other => Self::BidStore(other),
        }
    }
}

/// Result type for marketplace lifecycle service operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Marketplace lifecycle orchestration service.
#[derive(Clone)]
pub struct MarketplaceService<T, B, C>
where
    T: TaskRepository,
    B: BidRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    bids: Arc<B>,
    clock: Arc<C>,
}

impl<T, B, C> MarketplaceService<T, B, C>
where
    T: TaskRepository,
    B: BidRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new marketplace lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, bids: Arc<B>, clock: Arc<C>) -> Self {
        Self { tasks, bids, clock }
    }

    /// Posts a new task on behalf of `poster_id`.
    ///
    /// The task is created in [`TaskStatus::Open`].
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Validation`] when the title, description,
    /// or budget range is invalid, or a store error when persistence fails.
    pub async fn post_task(
        &self,
        poster_id: UserId,
        request: PostTaskRequest,
    ) -> LifecycleResult<Task> {
        let budget =
            BudgetRange::from_cents(request.budget_min_cents, request.budget_max_cents)?;
        let mut details = TaskDetails::new(request.title, request.description, budget)?;
        if let Some(category) = request.category {
            details = details.with_category(category);
        }
        if let Some(worker_type) = request.preferred_worker_type {
            details = details.with_preferred_worker_type(worker_type);
        }
        if let Some(deadline) = request.deadline {
            details = details.with_deadline(deadline);
        }

        let task = Task::post(poster_id, details, &*self.clock);
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] when no such task exists.
    pub async fn get_task(&self, task_id: TaskId) -> LifecycleResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::TaskNotFound(task_id))
    }

    /// Lists tasks satisfying the filter, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> LifecycleResult<Vec<Task>> {
        Ok(self.tasks.list(filter).await?)
    }

    /// Submits a bid on an open task on behalf of `bidder_id`.
    ///
    /// The bid is created in [`BidStatus::Pending`]. Eligibility is a
    /// lifecycle rule, not a storage rule: the task must be open and the
    /// bidder must not be the poster.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] when the task is missing,
    /// [`LifecycleError::SelfBid`] when the bidder posted the task,
    /// [`LifecycleError::TaskClosedForBids`] when the task is not open, or
    /// [`LifecycleError::Validation`] when the terms are invalid.
    pub async fn submit_bid(
        &self,
        task_id: TaskId,
        bidder_id: UserId,
        request: SubmitBidRequest,
    ) -> LifecycleResult<Bid> {
        let amount = Amount::new(request.amount_cents)?;
        let mut terms = BidTerms::new(amount, request.proposal)?;
        if let Some(hours) = request.estimated_hours {
            terms = terms.with_estimated_hours(hours);
        }
        if let Some(date) = request.estimated_completion {
            terms = terms.with_estimated_completion(date);
        }

        let task = self.get_task(task_id).await?;
        if task.poster_id() == bidder_id {
            return Err(LifecycleError::SelfBid { task_id, bidder_id });
        }
        if task.status() != TaskStatus::Open {
            return Err(LifecycleError::TaskClosedForBids {
                task_id,
                status: task.status(),
            });
        }

        let bid = Bid::submit(task_id, bidder_id, terms, &*self.clock);
        self.bids.store(&bid).await?;
        Ok(bid)
    }

    /// Lists the bids on a task, ordered by submission time.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails.
    pub async fn list_bids_for_task(&self, task_id: TaskId) -> LifecycleResult<Vec<Bid>> {
        Ok(self.bids.list_for_task(task_id).await?)
    }

    /// Lists every bid submitted by a user.
    ///
    /// # Errors
    ///
    /// Returns a store error when the listing fails.
    pub async fn list_bids_for_bidder(&self, bidder_id: UserId) -> LifecycleResult<Vec<Bid>> {
        Ok(self.bids.list_for_bidder(bidder_id).await?)
    }

    /// Accepts one bid on an open task, rejecting every sibling.
    ///
    /// The task-status compare-and-swap is the serialisation point: of two
    /// concurrent acceptances on the same task, exactly one observes the
    /// task still open and wins; the loser fails with
    /// [`LifecycleError::TaskNotOpen`]. The winner then resolves the whole
    /// bid set in one atomic batch, so at most one bid per task is ever
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`] or
    /// [`LifecycleError::BidNotFound`] when a referenced entity is missing
    /// or mismatched, [`LifecycleError::NotTaskPoster`] when the caller did
    /// not post the task, [`LifecycleError::TaskNotOpen`] when the task has
    /// left the open state, or [`LifecycleError::BidNotPending`] when the
    /// bid was already resolved.
    pub async fn accept_bid(
        &self,
        task_id: TaskId,
        accepting_user_id: UserId,
        bid_id: BidId,
    ) -> LifecycleResult<Task> {
        let mut task = self.get_task(task_id).await?;
        if task.poster_id() != accepting_user_id {
            return Err(LifecycleError::NotTaskPoster {
                task_id,
                user_id: accepting_user_id,
            });
        }
        if task.status() != TaskStatus::Open {
            return Err(LifecycleError::TaskNotOpen {
                task_id,
                status: task.status(),
            });
        }

        let target = self
            .bids
            .find_by_id(bid_id)
            .await?
            .filter(|bid| bid.task_id() == task_id)
            .ok_or(LifecycleError::BidNotFound(bid_id))?;
        if target.status() != BidStatus::Pending {
            return Err(LifecycleError::BidNotPending {
                bid_id,
                status: target.status(),
            });
        }

        task.transition_to(TaskStatus::InProgress, &*self.clock)?;
        self.tasks
            .update_if_status(&task, TaskStatus::Open)
            .await?;

        self.resolve_bids(task_id, Some(bid_id)).await?;
        Ok(task)
    }

    /// Cancels an open task on behalf of its poster.
    ///
    /// Every pending bid is rejected in the same atomic batch used by the
    /// acceptance cascade. Cancellation is only permitted while the task is
    /// open; an in-progress task is a commitment to the accepted bidder.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`],
    /// [`LifecycleError::NotTaskPoster`], or [`LifecycleError::TaskNotOpen`]
    /// when the task has already left the open state.
    pub async fn cancel_task(
        &self,
        task_id: TaskId,
        caller_id: UserId,
    ) -> LifecycleResult<Task> {
        let mut task = self.get_task(task_id).await?;
        if task.poster_id() != caller_id {
            return Err(LifecycleError::NotTaskPoster {
                task_id,
                user_id: caller_id,
            });
        }
        if task.status() != TaskStatus::Open {
            return Err(LifecycleError::TaskNotOpen {
                task_id,
                status: task.status(),
            });
        }

        task.transition_to(TaskStatus::Cancelled, &*self.clock)?;
        self.tasks
            .update_if_status(&task, TaskStatus::Open)
            .await?;

        self.resolve_bids(task_id, None).await?;
        Ok(task)
    }

    /// Marks an in-progress task as completed on behalf of its poster.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::TaskNotFound`],
    /// [`LifecycleError::NotTaskPoster`], or
    /// [`LifecycleError::TaskNotInProgress`] when the task is not in
    /// progress.
    pub async fn complete_task(
        &self,
        task_id: TaskId,
        caller_id: UserId,
    ) -> LifecycleResult<Task> {
        let mut task = self.get_task(task_id).await?;
        if task.poster_id() != caller_id {
            return Err(LifecycleError::NotTaskPoster {
                task_id,
                user_id: caller_id,
            });
        }
        if task.status() != TaskStatus::InProgress {
            return Err(LifecycleError::TaskNotInProgress {
                task_id,
                status: task.status(),
            });
        }

        task.transition_to(TaskStatus::Completed, &*self.clock)?;
        match self
            .tasks
            .update_if_status(&task, TaskStatus::InProgress)
            .await
        {
            Ok(()) => Ok(task),
            Err(TaskRepositoryError::StatusConflict { task_id: id, actual }) => {
                Err(LifecycleError::TaskNotInProgress {
                    task_id: id,
                    status: actual,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Resolves the bid set of a task that just left the open state.
    ///
    /// With `accepted` set, that bid is accepted and every other pending
    /// bid rejected; with `None`, every pending bid is rejected. Runs after
    /// the status CAS, so only the single transition winner executes it.
    async fn resolve_bids(
        &self,
        task_id: TaskId,
        accepted: Option<BidId>,
    ) -> LifecycleResult<()> {
        let all_bids = self.bids.list_for_task(task_id).await?;
        let mut changed = Vec::new();
        for mut bid in all_bids {
            if accepted == Some(bid.id()) {
                bid.accept(&*self.clock)?;
                changed.push(bid);
            } else if bid.status() == BidStatus::Pending {
                bid.reject(&*self.clock)?;
                changed.push(bid);
            }
        }
        if !changed.is_empty() {
            self.bids.update_many(&changed).await?;
        }
        Ok(())
    }
}
