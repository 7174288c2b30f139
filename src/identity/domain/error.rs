//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The email address is not structurally valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The redirect URL is empty after trimming.
    #[error("redirect URL must not be empty")]
    EmptyRedirectUrl,
}
