//! Domain-focused tests for identity value objects.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::identity::domain::{EmailAddress, IdentityDomainError, SignInRequest};
use rstest::rstest;

#[rstest]
#[case("worker@example.com")]
#[case("  Poster@Example.COM  ")]
#[case("first.last@sub.example.org")]
fn email_address_accepts_valid_values(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), raw.trim().to_ascii_lowercase());
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("worker@")]
#[case("worker@localhost")]
#[case("two@@example.com")]
#[case("spaced out@example.com")]
fn email_address_rejects_invalid_values(#[case] raw: &str) {
    let result = EmailAddress::new(raw);
    assert_eq!(result, Err(IdentityDomainError::InvalidEmail(raw.to_owned())));
}

#[rstest]
fn sign_in_request_rejects_empty_redirect() {
    let email = EmailAddress::new("worker@example.com").expect("valid email");
    let result = SignInRequest::new(email, "   ");
    assert_eq!(result, Err(IdentityDomainError::EmptyRedirectUrl));
}

#[rstest]
fn sign_in_request_carries_metadata() {
    let email = EmailAddress::new("worker@example.com").expect("valid email");
    let request = SignInRequest::new(email, "https://lobsterwork.test/marketplace")
        .expect("valid request")
        .with_metadata(serde_json::json!({ "display_name": "Pinchy" }));

    assert_eq!(
        request.redirect_url(),
        "https://lobsterwork.test/marketplace"
    );
    assert_eq!(
        request
            .metadata()
            .and_then(|metadata| metadata.get("display_name"))
            .and_then(|value| value.as_str()),
        Some("Pinchy")
    );
}
