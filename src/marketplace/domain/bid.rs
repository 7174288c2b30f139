//! Bid aggregate root and bid lifecycle types.

use super::{Amount, BidId, MarketplaceDomainError, ParseBidStatusError, TaskId};
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bid lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BidStatus {
    /// Awaiting the poster's decision.
    Pending,
    /// Chosen by the poster; the task moved into progress.
    Accepted,
    /// Declined, either directly or because a sibling bid was accepted.
    Rejected,
}

impl BidStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns whether no further transitions are permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl TryFrom<&str> for BidStatus {
    type Error = ParseBidStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(ParseBidStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated commercial terms of a bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidTerms {
    amount: Amount,
    proposal: String,
    estimated_hours: Option<u32>,
    estimated_completion: Option<NaiveDate>,
}

impl BidTerms {
    /// Creates validated bid terms with required fields.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::EmptyProposal`] when the proposal
    /// is empty after trimming.
    pub fn new(
        amount: Amount,
        proposal: impl Into<String>,
    ) -> Result<Self, MarketplaceDomainError> {
        let trimmed = proposal.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(MarketplaceDomainError::EmptyProposal);
        }
        Ok(Self {
            amount,
            proposal: trimmed,
            estimated_hours: None,
            estimated_completion: None,
        })
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

/// Bid aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    id: BidId,
    task_id: TaskId,
    bidder_id: UserId,
    terms: BidTerms,
    status: BidStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted bid aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBidData {
    /// Persisted bid identifier.
    pub id: BidId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted bidder identity.
    pub bidder_id: UserId,
    /// Persisted commercial terms.
    pub terms: BidTerms,
    /// Persisted lifecycle status.
    pub status: BidStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    /// Creates a newly submitted bid in [`BidStatus::Pending`].
    #[must_use]
    pub fn submit(task_id: TaskId, bidder_id: UserId, terms: BidTerms, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: BidId::new(),
            task_id,
            bidder_id,
            terms,
            status: BidStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a bid from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBidData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            bidder_id: data.bidder_id,
            terms: data.terms,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the bid identifier.
    #[must_use]
    pub const fn id(&self) -> BidId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the identity of the submitting user.
    #[must_use]
    pub const fn bidder_id(&self) -> UserId {
        self.bidder_id
    }

    /// Returns the bid amount.
    #[must_use]
    pub const fn amount(&self) -> Amount {
        self.terms.amount
    }

    /// Returns the proposal text.
    #[must_use]
    pub fn proposal(&self) -> &str {
        &self.terms.proposal
    }

    /// Returns the estimated effort in whole hours, if stated.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<u32> {
        self.terms.estimated_hours
    }

    /// Returns the estimated completion date, if stated.
    #[must_use]
    pub const fn estimated_completion(&self) -> Option<NaiveDate> {
        self.terms.estimated_completion
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BidStatus {
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

    /// Marks the bid as accepted by the poster.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::InvalidBidTransition`] when the bid
    /// is no longer pending.
    pub fn accept(&mut self, clock: &impl Clock) -> Result<(), MarketplaceDomainError> {
        self.transition_to(BidStatus::Accepted, clock)
    }

    /// Marks the bid as rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MarketplaceDomainError::InvalidBidTransition`] when the bid
    /// is no longer pending.
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), MarketplaceDomainError> {
        self.transition_to(BidStatus::Rejected, clock)
    }

    fn transition_to(
        &mut self,
        next: BidStatus,
        clock: &impl Clock,
    ) -> Result<(), MarketplaceDomainError> {
        if self.status.is_terminal() {
            return Err(MarketplaceDomainError::InvalidBidTransition {
                bid_id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = clock.utc();
        Ok(())
    }
}
