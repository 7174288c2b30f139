//! Diesel row models and domain conversions for marketplace persistence.

use super::schema::{bids, tasks};
use crate::identity::domain::UserId;
use crate::marketplace::{
    domain::{
        Amount, Bid, BidId, BidStatus, BidTerms, BudgetRange, Category, PersistedBidData,
        PersistedTaskData, Task, TaskDetails, TaskId, TaskStatus, WorkerType,
    },
    ports::{BidRepositoryError, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Identity of the posting user.
    pub poster_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Budget lower bound in minor currency units.
    pub budget_min_cents: i64,
    /// Budget upper bound in minor currency units.
    pub budget_max_cents: i64,
    /// Optional category tag.
    pub category: Option<String>,
    /// Optional advisory worker-type preference.
    pub preferred_worker_type: Option<String>,
    /// Optional informational deadline.
    pub deadline: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Identity of the posting user.
    pub poster_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Budget lower bound in minor currency units.
    pub budget_min_cents: i64,
    /// Budget upper bound in minor currency units.
    pub budget_max_cents: i64,
    /// Optional category tag.
    pub category: Option<String>,
    /// Optional advisory worker-type preference.
    pub preferred_worker_type: Option<String>,
    /// Optional informational deadline.
    pub deadline: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for bid records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bids)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BidRow {
    /// Bid identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Identity of the submitting user.
    pub bidder_id: uuid::Uuid,
    /// Bid amount in minor currency units.
    pub amount_cents: i64,
    /// Proposal text.
    pub proposal: String,
    /// Optional estimated effort in whole hours.
    pub estimated_hours: Option<i32>,
    /// Optional estimated completion date.
    pub estimated_completion: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for bid records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bids)]
pub struct NewBidRow {
    /// Bid identifier.
    pub id: uuid::Uuid,
    /// Owning task identifier.
    pub task_id: uuid::Uuid,
    /// Identity of the submitting user.
    pub bidder_id: uuid::Uuid,
    /// Bid amount in minor currency units.
    pub amount_cents: i64,
    /// Proposal text.
    pub proposal: String,
    /// Optional estimated effort in whole hours.
    pub estimated_hours: Option<i32>,
    /// Optional estimated completion date.
    pub estimated_completion: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Maps a task aggregate to its insert model.
pub fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        poster_id: task.poster_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        budget_min_cents: task.budget().min().cents(),
        budget_max_cents: task.budget().max().cents(),
        category: task.category().map(|category| category.as_str().to_owned()),
        preferred_worker_type: task
            .preferred_worker_type()
            .map(|worker_type| worker_type.as_str().to_owned()),
        deadline: task.deadline(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

/// Reconstructs a task aggregate from its query row.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when stored values fail
/// domain validation.
pub fn row_to_task(row: TaskRow) -> Result<Task, TaskRepositoryError> {
    let budget = BudgetRange::from_cents(row.budget_min_cents, row.budget_max_cents)
        .map_err(TaskRepositoryError::persistence)?;
    let mut details = TaskDetails::new(row.title, row.description, budget)
        .map_err(TaskRepositoryError::persistence)?;
    if let Some(category) = row.category {
        details = details.with_category(
            Category::try_from(category.as_str()).map_err(TaskRepositoryError::persistence)?,
        );
    }
    if let Some(worker_type) = row.preferred_worker_type {
        details = details.with_preferred_worker_type(
            WorkerType::try_from(worker_type.as_str())
                .map_err(TaskRepositoryError::persistence)?,
        );
    }
    if let Some(deadline) = row.deadline {
        details = details.with_deadline(deadline);
    }
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        poster_id: UserId::from_uuid(row.poster_id),
        details,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Maps a bid aggregate to its insert model.
///
/// # Errors
///
/// Returns [`BidRepositoryError::Persistence`] when the estimated hours do
/// not fit the schema-backed integer column.
pub fn bid_to_new_row(bid: &Bid) -> Result<NewBidRow, BidRepositoryError> {
    let estimated_hours = bid
        .estimated_hours()
        .map(i32::try_from)
        .transpose()
        .map_err(BidRepositoryError::persistence)?;

    Ok(NewBidRow {
        id: bid.id().into_inner(),
        task_id: bid.task_id().into_inner(),
        bidder_id: bid.bidder_id().into_inner(),
        amount_cents: bid.amount().cents(),
        proposal: bid.proposal().to_owned(),
        estimated_hours,
        estimated_completion: bid.estimated_completion(),
        status: bid.status().as_str().to_owned(),
        created_at: bid.created_at(),
        updated_at: bid.updated_at(),
    })
}

/// Reconstructs a bid aggregate from its query row.
///
/// # Errors
///
/// Returns [`BidRepositoryError::Persistence`] when stored values fail
/// domain validation.
pub fn row_to_bid(row: BidRow) -> Result<Bid, BidRepositoryError> {
    let amount = Amount::new(row.amount_cents).map_err(BidRepositoryError::persistence)?;
    let mut terms =
        BidTerms::new(amount, row.proposal).map_err(BidRepositoryError::persistence)?;
    if let Some(hours) = row.estimated_hours {
        terms = terms.with_estimated_hours(
            u32::try_from(hours).map_err(BidRepositoryError::persistence)?,
        );
    }
    if let Some(date) = row.estimated_completion {
        terms = terms.with_estimated_completion(date);
    }
    let status =
        BidStatus::try_from(row.status.as_str()).map_err(BidRepositoryError::persistence)?;

    Ok(Bid::from_persisted(PersistedBidData {
        id: BidId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        bidder_id: UserId::from_uuid(row.bidder_id),
        terms,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
