//! Behavioural tests for the in-memory identity provider.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::identity::{
    adapters::memory::InMemoryIdentityProvider,
    domain::{EmailAddress, SignInRequest},
    ports::{IdentityProvider, IdentityProviderError},
};
use rstest::{fixture, rstest};

#[fixture]
fn provider() -> InMemoryIdentityProvider {
    InMemoryIdentityProvider::new()
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn current_user_is_none_without_session(provider: InMemoryIdentityProvider) {
    let user = provider.current_user().await.expect("lookup should succeed");
    assert!(user.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_round_trip_provisions_user(provider: InMemoryIdentityProvider) {
    let address = email("worker@example.com");
    let request = SignInRequest::new(address.clone(), "https://lobsterwork.test/marketplace")
        .expect("valid request")
        .with_metadata(serde_json::json!({ "display_name": "Pinchy" }));

    provider
        .request_sign_in(request)
        .await
        .expect("link request should succeed");
    let queued = provider.pending_sign_ins().expect("outbox should be readable");
    assert_eq!(queued.len(), 1);

    let user = provider
        .complete_sign_in(&address)
        .expect("completion should succeed");
    assert_eq!(user.email(), &address);
    assert_eq!(user.display_name(), Some("Pinchy"));

    let session = provider.current_user().await.expect("lookup should succeed");
    assert_eq!(session, Some(user));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeat_sign_in_reuses_the_same_identity(provider: InMemoryIdentityProvider) {
    let address = email("worker@example.com");
    for _ in 0..2 {
        let request = SignInRequest::new(address.clone(), "https://lobsterwork.test/dashboard")
            .expect("valid request");
        provider
            .request_sign_in(request)
            .await
            .expect("link request should succeed");
    }

    let first = provider
        .complete_sign_in(&address)
        .expect("first completion should succeed");
    provider.sign_out().expect("sign-out should succeed");
    let second = provider
        .complete_sign_in(&address)
        .expect("second completion should succeed");

    assert_eq!(first.id(), second.id());
}

#[rstest]
fn complete_sign_in_without_request_is_rejected(provider: InMemoryIdentityProvider) {
    let result = provider.complete_sign_in(&email("nobody@example.com"));
    assert!(matches!(
        result,
        Err(IdentityProviderError::NoPendingSignIn { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_out_clears_the_session(provider: InMemoryIdentityProvider) {
    let address = email("worker@example.com");
    let request = SignInRequest::new(address.clone(), "https://lobsterwork.test/marketplace")
        .expect("valid request");
    provider
        .request_sign_in(request)
        .await
        .expect("link request should succeed");
    provider
        .complete_sign_in(&address)
        .expect("completion should succeed");

    provider.sign_out().expect("sign-out should succeed");

    let session = provider.current_user().await.expect("lookup should succeed");
    assert!(session.is_none());
}
