//! Validated email address scalar.

use super::IdentityDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized, structurally validated email address.
///
/// Validation is deliberately shallow — one `@` with non-empty local and
/// domain parts and a dotted domain. Deliverability is the external
/// provider's concern; the magic-link round trip is the real proof of
/// ownership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidEmail`] when the value does not
    /// have the shape `local@domain.tld`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let domain_is_dotted = domain.split('.').count() >= 2
            && domain.split('.').all(|segment| !segment.is_empty());
        let is_valid = !local.is_empty()
            && !has_more_parts
            && domain_is_dotted
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(IdentityDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the email address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
