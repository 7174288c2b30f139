//! Domain model for caller identity.

mod email;
mod error;
mod user;

pub use email::EmailAddress;
pub use error::IdentityDomainError;
pub use user::{SignInRequest, UserId, UserRecord};
