//! Caller identity for LobsterWork.
//!
//! Identity is delegated to an external passwordless provider: users sign
//! in by requesting a magic link for their email address. This module
//! models only the surface the lifecycle core consumes — a durable opaque
//! user identifier plus email — and the sign-in initiation call. Credential
//! storage, token issuance, and email delivery stay outside the crate.
//!
//! Lifecycle operations never read ambient session state; they take the
//! caller's [`domain::UserId`] explicitly. The [`ports::IdentityProvider`]
//! port exists for the presentation boundary that resolves a session to a
//! user before calling the marketplace service.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
