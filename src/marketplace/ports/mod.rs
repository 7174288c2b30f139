//! Port contracts for marketplace persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by marketplace
//! services.

pub mod repository;

pub use repository::{
    BidRepository, BidRepositoryError, BidRepositoryResult, TaskFilter, TaskRepository,
    TaskRepositoryError, TaskRepositoryResult,
};
