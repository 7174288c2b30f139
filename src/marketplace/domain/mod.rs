//! Domain model for the task/bid marketplace lifecycle.
//!
//! The marketplace domain models task posting, bid submission, and the
//! status state machines governing acceptance, rejection, cancellation,
//! and completion, while keeping all infrastructure concerns outside of
//! the domain boundary.

mod bid;
mod error;
mod ids;
mod money;
mod task;

pub use bid::{Bid, BidStatus, BidTerms, PersistedBidData};
pub use error::{
    MarketplaceDomainError, ParseBidStatusError, ParseCategoryError, ParseTaskStatusError,
    ParseWorkerTypeError,
};
pub use ids::{BidId, TaskId};
pub use money::{Amount, BudgetRange};
pub use task::{Category, PersistedTaskData, Task, TaskDetails, TaskStatus, WorkerType};
