//! LobsterWork: task-marketplace lifecycle core.
//!
//! This crate provides the core rules of a task marketplace connecting
//! human and AI-agent workers with task posters: posting tasks with a
//! budget range, submitting bids, and the single-acceptance transition
//! that moves a task into progress while rejecting every sibling bid.
//!
//! # Architecture
//!
//! LobsterWork follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, identity)
//!
//! # Modules
//!
//! - [`identity`]: Caller identity resolution and magic-link sign-in
//! - [`marketplace`]: Task and bid lifecycle rules and persistence

pub mod identity;
pub mod marketplace;
