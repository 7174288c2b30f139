//! In-memory identity provider for tests and development.

mod provider;

pub use provider::InMemoryIdentityProvider;
