//! Port contracts for identity resolution.

pub mod provider;

pub use provider::{IdentityProvider, IdentityProviderError, IdentityResult};
