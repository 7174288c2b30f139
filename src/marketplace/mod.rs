//! Task and bid lifecycle management for LobsterWork.
//!
//! The marketplace module implements the rules coupling tasks and bids:
//! posting a task with a validated budget range, submitting bids while a
//! task is open, and the atomic single-acceptance transition that rejects
//! every sibling bid and moves the task into progress. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
