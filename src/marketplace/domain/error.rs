//! Error types for marketplace domain validation and parsing.

use super::{BidId, BidStatus, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MarketplaceDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The bid proposal is empty after trimming.
    #[error("bid proposal must not be empty")]
    EmptyProposal,

    /// A monetary amount is below zero.
    #[error("amount {0} must not be negative")]
    NegativeAmount(i64),

    /// The budget minimum exceeds the budget maximum.
    #[error("budget minimum {min} exceeds maximum {max}")]
    InvalidBudgetRange {
        /// Lower bound in minor currency units.
        min: i64,
        /// Upper bound in minor currency units.
        max: i64,
    },

    /// A task status transition violates the lifecycle state machine.
    #[error("task {task_id} cannot transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Task attempting the transition.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// A bid status transition violates the lifecycle state machine.
    #[error("bid {bid_id} cannot transition from {from} to {to}")]
    InvalidBidTransition {
        /// Bid attempting the transition.
        bid_id: BidId,
        /// Current status.
        from: BidStatus,
        /// Requested status.
        to: BidStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing bid statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown bid status: {0}")]
pub struct ParseBidStatusError(pub String);

/// Error returned while parsing task categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseCategoryError(pub String);

/// Error returned while parsing worker types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown worker type: {0}")]
pub struct ParseWorkerTypeError(pub String);
