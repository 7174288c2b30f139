//! Identity provider port.

use crate::identity::domain::{SignInRequest, UserRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityProviderError>;

/// External authentication surface consumed by the presentation boundary.
///
/// The provider owns credential storage, token issuance, and magic-link
/// email delivery; this crate only initiates sign-ins and resolves the
/// current session to a user record.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the current session to an authenticated user.
    ///
    /// Returns `None` when no session is active.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Provider`] when the provider cannot
    /// be reached.
    async fn current_user(&self) -> IdentityResult<Option<UserRecord>>;

    /// Initiates a passwordless sign-in by sending a magic link.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::DeliveryFailed`] when the link
    /// cannot be sent.
    async fn request_sign_in(&self, request: SignInRequest) -> IdentityResult<()>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityProviderError {
    /// The magic link could not be delivered.
    #[error("magic link delivery failed for {email}")]
    DeliveryFailed {
        /// Address the delivery was attempted to.
        email: String,
    },

    /// A sign-in completion referenced an email with no outstanding link.
    #[error("no pending sign-in for {email}")]
    NoPendingSignIn {
        /// Address the completion was attempted for.
        email: String,
    },

    /// Provider-side failure.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityProviderError {
    /// Wraps a provider-side error.
    #[must_use]
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
