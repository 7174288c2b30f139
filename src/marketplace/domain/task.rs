//! Task aggregate root and related lifecycle types.

use super::{
    BudgetRange, MarketplaceDomainError, ParseCategoryError, ParseTaskStatusError,
    ParseWorkerTypeError, TaskId,
};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Task is browsable and accepting bids.
    Open,
    /// A bid has been accepted and work is underway.
    InProgress,
    /// Work has been delivered and signed off.
    Completed,
    /// The poster withdrew the task before acceptance.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether the lifecycle permits moving to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns whether no further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marketplace category tag attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Software development work.
    Development,
    /// Visual and product design work.
    Design,
    /// Copywriting and editorial work.
    Writing,
    /// Data collection and research work.
    Data,
    /// Marketing and outreach work.
    Marketing,
    /// Anything that fits no other category.
    Other,
}

impl Category {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Design => "design",
            Self::Writing => "writing",
            Self::Data => "data",
            Self::Marketing => "marketing",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "development" => Ok(Self::Development),
            "design" => Ok(Self::Design),
            "writing" => Ok(Self::Writing),
            "data" => Ok(Self::Data),
            "marketing" => Ok(Self::Marketing),
            "other" => Ok(Self::Other),
            _ => Err(ParseCategoryError(value.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory preference for the kind of worker a poster would like.
///
/// Never consulted by any lifecycle rule; bids from either kind are always
/// eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerType {
    /// Human worker preferred.
    Human,
    /// AI-agent worker preferred.
    Agent,
}

impl WorkerType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::Agent => "AGENT",
        }
    }
}

impl TryFrom<&str> for WorkerType {
    type Error = ParseWorkerTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "HUMAN" => Ok(Self::Human),
            "AGENT" => Ok(Self::Agent),
            _ => Err(ParseWorkerTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated descriptive content for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: String,
    description: String,
    budget: BudgetRange,
    category: Option<Category>,
    preferred_worker_type: Option<WorkerType>,
    deadline: Option<NaiveDate>,
}

impl TaskDetails {
    /// Creates validated task details with required fields.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::EmptyTitle`] or
    /// [`MarketplaceDomainError::EmptyDescription`] when either text is
    /// empty after trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        budget: BudgetRange,
    ) -> Result<Self, MarketplaceDomainError> {
        let trimmed_title = title.into().trim().to_owned();
        if trimmed_title.is_empty() {
            return Err(MarketplaceDomainError::EmptyTitle);
        }
        let trimmed_description = description.into().trim().to_owned();
        if trimmed_description.is_empty() {
            return Err(MarketplaceDomainError::EmptyDescription);
        }
        Ok(Self {
            title: trimmed_title,
            description: trimmed_description,
            budget,
            category: None,
            preferred_worker_type: None,
            deadline: None,
        })
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

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    poster_id: UserId,
    details: TaskDetails,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted poster identity.
    pub poster_id: UserId,
    /// Persisted descriptive content.
    pub details: TaskDetails,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a newly posted task in [`TaskStatus::Open`].
    #[must_use]
    pub fn post(poster_id: UserId, details: TaskDetails, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            poster_id,
            details,
            status: TaskStatus::Open,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            poster_id: data.poster_id,
            details: data.details,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the identity of the posting user.
    #[must_use]
    pub const fn poster_id(&self) -> UserId {
        self.poster_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.details.description
    }

    /// Returns the budget range.
    #[must_use]
    pub const fn budget(&self) -> BudgetRange {
        self.details.budget
    }

    /// Returns the category tag, if any.
    #[must_use]
    pub const fn category(&self) -> Option<Category> {
        self.details.category
    }

    /// Returns the advisory worker-type preference, if any.
    #[must_use]
    pub const fn preferred_worker_type(&self) -> Option<WorkerType> {
        self.details.preferred_worker_type
    }

    /// Returns the informational deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.details.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `next` when the state machine permits it.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::InvalidStatusTransition`] when the
    /// current status does not permit the transition.
    pub fn transition_to(
        &mut self,
        next: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), MarketplaceDomainError> {
        if !self.status.can_transition_to(next) {
            return Err(MarketplaceDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
