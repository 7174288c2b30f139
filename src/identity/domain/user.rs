//! User identity records and sign-in requests.

use super::{EmailAddress, IdentityDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Durable opaque identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolved identity of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    email: EmailAddress,
    display_name: Option<String>,
}

impl UserRecord {
    /// Creates a user record.
    #[must_use]
    pub const fn new(id: UserId, email: EmailAddress, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user's email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name chosen at sign-up, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Magic-link sign-in initiation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    email: EmailAddress,
    redirect_url: String,
    metadata: Option<serde_json::Value>,
}

impl SignInRequest {
    /// Creates a sign-in request for the given email and post-sign-in
    /// redirect.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyRedirectUrl`] when the redirect
    /// URL is empty after trimming.
    pub fn new(
        email: EmailAddress,
        redirect_url: impl Into<String>,
    ) -> Result<Self, IdentityDomainError> {
        let trimmed = redirect_url.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyRedirectUrl);
        }
        Ok(Self {
            email,
            redirect_url: trimmed,
            metadata: None,
        })
    }

    /// Attaches sign-up metadata (for example a display name) forwarded to
    /// the provider on first sign-in.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the email address the link is sent to.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the post-sign-in redirect URL.
    #[must_use]
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    /// Returns the attached sign-up metadata, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }
}
