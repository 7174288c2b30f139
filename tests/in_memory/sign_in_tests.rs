//! Magic-link sign-in tests against the in-memory identity provider.

use crate::in_memory::helpers::{identity, runtime, sign_in};
use lobsterwork::identity::{
    adapters::memory::InMemoryIdentityProvider, ports::IdentityProvider,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that completing a sign-in establishes the session.
#[rstest]
fn completed_sign_in_establishes_session(
    runtime: io::Result<Runtime>,
    identity: InMemoryIdentityProvider,
) {
    let rt = runtime.expect("runtime creation");

    let before = rt
        .block_on(identity.current_user())
        .expect("session lookup");
    assert!(before.is_none(), "No session before sign-in");

    let user = sign_in(&rt, &identity, "worker@example.com", "Pinchy").expect("sign-in");
    assert_eq!(user.display_name(), Some("Pinchy"));

    let after = rt
        .block_on(identity.current_user())
        .expect("session lookup");
    assert_eq!(after, Some(user));
}

/// Tests that the same address keeps the same identity across sessions.
#[rstest]
fn returning_user_keeps_their_identity(
    runtime: io::Result<Runtime>,
    identity: InMemoryIdentityProvider,
) {
    let rt = runtime.expect("runtime creation");

    let first = sign_in(&rt, &identity, "worker@example.com", "Pinchy").expect("first sign-in");
    identity.sign_out().expect("sign-out");
    let second = sign_in(&rt, &identity, "worker@example.com", "Pinchy").expect("second sign-in");

    assert_eq!(first.id(), second.id());
}
