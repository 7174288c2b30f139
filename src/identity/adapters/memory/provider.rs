//! In-memory identity provider.
//!
//! Mimics the hosted passwordless provider closely enough for lifecycle
//! and integration tests: requesting a sign-in queues a "magic link" in an
//! assertable outbox, and completing it provisions the user on first use,
//! picking up a `display_name` from the sign-up metadata when present.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{EmailAddress, SignInRequest, UserId, UserRecord},
    ports::{IdentityProvider, IdentityProviderError, IdentityResult},
};

/// Thread-safe in-memory identity provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    users: HashMap<EmailAddress, UserRecord>,
    outbox: Vec<SignInRequest>,
    session: Option<UserRecord>,
}

fn poisoned(err: impl std::fmt::Display) -> IdentityProviderError {
    IdentityProviderError::provider(std::io::Error::other(err.to_string()))
}

/// Extracts a display name from sign-up metadata.
fn display_name_from(request: &SignInRequest) -> Option<String> {
    request
        .metadata()
        .and_then(|metadata| metadata.get("display_name"))
        .and_then(|value| value.as_str())
        .map(str::to_owned)
}

impl InMemoryIdentityProvider {
    /// Creates a provider with no users and no active session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes the most recent pending sign-in for `email`, provisioning
    /// the user on first use and activating their session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::NoPendingSignIn`] when no link was
    /// requested for the address.
    pub fn complete_sign_in(&self, email: &EmailAddress) -> IdentityResult<UserRecord> {
        let mut state = self.state.write().map_err(poisoned)?;
        let position = state
            .outbox
            .iter()
            .rposition(|request| request.email() == email)
            .ok_or_else(|| IdentityProviderError::NoPendingSignIn {
                email: email.to_string(),
            })?;
        let request = state.outbox.remove(position);

        let user = state
            .users
            .entry(email.clone())
            .or_insert_with(|| {
                UserRecord::new(UserId::new(), email.clone(), display_name_from(&request))
            })
            .clone();
        state.session = Some(user.clone());
        Ok(user)
    }

    /// Clears the active session.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Provider`] when the session state is
    /// unavailable.
    pub fn sign_out(&self) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.session = None;
        Ok(())
    }

    /// Returns the queued sign-in requests, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityProviderError::Provider`] when the outbox is
    /// unavailable.
    pub fn pending_sign_ins(&self) -> IdentityResult<Vec<SignInRequest>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.outbox.clone())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn current_user(&self) -> IdentityResult<Option<UserRecord>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.session.clone())
    }

    async fn request_sign_in(&self, request: SignInRequest) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.outbox.push(request);
        Ok(())
    }
}
