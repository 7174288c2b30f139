//! `PostgreSQL` adapters for marketplace persistence.

mod bid;
mod models;
mod schema;
mod task;

pub use bid::PostgresBidRepository;
pub use task::{MarketplacePgPool, PostgresTaskRepository};
