//! Unit tests for the marketplace module.
//!
//! Tests are organised by concern: domain validation, status state
//! machines, service rules, and the acceptance transition.
