//! Shared test helpers for in-memory adapter integration tests.

use lobsterwork::identity::{
    adapters::memory::InMemoryIdentityProvider,
    domain::{EmailAddress, SignInRequest, UserRecord},
    ports::IdentityProvider,
};
use lobsterwork::marketplace::{
    adapters::memory::{InMemoryBidRepository, InMemoryTaskRepository},
    services::{MarketplaceService, PostTaskRequest},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Marketplace service wired to in-memory adapters.
pub type MemoryService =
    MarketplaceService<InMemoryTaskRepository, InMemoryBidRepository, DefaultClock>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory task repository for each test.
#[fixture]
pub fn tasks() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

/// Provides a fresh in-memory bid repository for each test.
#[fixture]
pub fn bids() -> InMemoryBidRepository {
    InMemoryBidRepository::new()
}

/// Provides a clock for lifecycle timestamps.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Provides a service over fresh in-memory repositories.
#[fixture]
pub fn service(tasks: InMemoryTaskRepository, bids: InMemoryBidRepository) -> MemoryService {
    MarketplaceService::new(Arc::new(tasks), Arc::new(bids), Arc::new(DefaultClock))
}

/// Provides a fresh in-memory identity provider for each test.
#[fixture]
pub fn identity() -> InMemoryIdentityProvider {
    InMemoryIdentityProvider::new()
}

/// Signs a user in through the full magic-link round trip.
///
/// # Errors
///
/// Returns an error if the link request or its completion fails.
pub fn sign_in(
    rt: &Runtime,
    provider: &InMemoryIdentityProvider,
    email: &str,
    display_name: &str,
) -> Result<UserRecord, Box<dyn std::error::Error + Send + Sync>> {
    let address = EmailAddress::new(email)?;
    let request = SignInRequest::new(address.clone(), "https://lobsterwork.test/marketplace")?
        .with_metadata(serde_json::json!({ "display_name": display_name }));
    rt.block_on(provider.request_sign_in(request))?;
    Ok(provider.complete_sign_in(&address)?)
}

/// Provides a valid post-task request with a 50.00-200.00 budget.
pub fn post_request() -> PostTaskRequest {
    PostTaskRequest::new(
        "Scrape product listings",
        "Collect listings from three storefronts nightly",
        5_000,
        20_000,
    )
}
