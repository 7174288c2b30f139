//! Unit tests for the identity module.

mod domain_tests;
mod provider_tests;
