//! In-memory repositories for marketplace lifecycle tests and development.

mod bid;
mod task;

pub use bid::InMemoryBidRepository;
pub use task::InMemoryTaskRepository;
