//! Constraint tests for the in-memory repositories.
//!
//! Tests duplicate detection, the guarded status update, and the
//! all-or-nothing batch write.

use crate::in_memory::helpers::{bids, clock, runtime, tasks};
use lobsterwork::identity::domain::UserId;
use lobsterwork::marketplace::{
    adapters::memory::{InMemoryBidRepository, InMemoryTaskRepository},
    domain::{Amount, Bid, BidTerms, BudgetRange, Task, TaskDetails, TaskId, TaskStatus},
    ports::{BidRepository, BidRepositoryError, TaskFilter, TaskRepository, TaskRepositoryError},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

fn sample_task(clock: &DefaultClock) -> Task {
    let budget = BudgetRange::from_cents(5_000, 20_000).expect("valid budget");
    let details = TaskDetails::new("Scrape site", "Collect listings nightly", budget)
        .expect("valid details");
    Task::post(UserId::new(), details, clock)
}

fn sample_bid(task_id: TaskId, clock: &DefaultClock) -> Bid {
    let amount = Amount::new(10_000).expect("valid amount");
    let terms = BidTerms::new(amount, "Nightly scraper").expect("valid terms");
    Bid::submit(task_id, UserId::new(), terms, clock)
}

/// Tests that duplicate task identifiers are rejected.
#[rstest]
fn duplicate_task_id_rejected(
    runtime: io::Result<Runtime>,
    tasks: InMemoryTaskRepository,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let task = sample_task(&clock);

    rt.block_on(tasks.store(&task)).expect("first store");

    let result = rt.block_on(tasks.store(&task));
    assert!(
        matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
        "Should reject duplicate task ID"
    );
}

/// Tests that the guarded update applies only when the stored status matches.
#[rstest]
fn guarded_update_detects_stale_status(
    runtime: io::Result<Runtime>,
    tasks: InMemoryTaskRepository,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let mut task = sample_task(&clock);
    rt.block_on(tasks.store(&task)).expect("store");

    task.transition_to(TaskStatus::InProgress, &clock)
        .expect("open to in-progress");
    rt.block_on(tasks.update_if_status(&task, TaskStatus::Open))
        .expect("first guarded update");

    // A second caller still holding the open snapshot must lose.
    let mut stale = rt
        .block_on(tasks.find_by_id(task.id()))
        .expect("lookup")
        .expect("stored task");
    stale
        .transition_to(TaskStatus::Completed, &clock)
        .expect("in-progress to completed");
    let result = rt.block_on(tasks.update_if_status(&stale, TaskStatus::Open));
    assert!(
        matches!(
            result,
            Err(TaskRepositoryError::StatusConflict {
                actual: TaskStatus::InProgress,
                ..
            })
        ),
        "Should report the stored status on conflict"
    );
}

/// Tests that the guarded update reports missing tasks.
#[rstest]
fn guarded_update_reports_missing_tasks(
    runtime: io::Result<Runtime>,
    tasks: InMemoryTaskRepository,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let task = sample_task(&clock);

    let result = rt.block_on(tasks.update_if_status(&task, TaskStatus::Open));
    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id == task.id()));
}

/// Tests that listing honours the browse filter.
#[rstest]
fn list_honours_filter(
    runtime: io::Result<Runtime>,
    tasks: InMemoryTaskRepository,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let first = sample_task(&clock);
    let second = sample_task(&clock);
    rt.block_on(tasks.store(&first)).expect("store first");
    rt.block_on(tasks.store(&second)).expect("store second");

    let by_poster = rt
        .block_on(tasks.list(&TaskFilter::new().with_poster(first.poster_id())))
        .expect("filtered list");
    assert_eq!(by_poster.len(), 1);
    assert_eq!(by_poster[0].id(), first.id());
}

/// Tests that duplicate bid identifiers are rejected.
#[rstest]
fn duplicate_bid_id_rejected(
    runtime: io::Result<Runtime>,
    bids: InMemoryBidRepository,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let bid = sample_bid(TaskId::new(), &clock);

    rt.block_on(bids.store(&bid)).expect("first store");

    let result = rt.block_on(bids.store(&bid));
    assert!(
        matches!(result, Err(BidRepositoryError::DuplicateBid(id)) if id == bid.id()),
        "Should reject duplicate bid ID"
    );
}

/// Tests that a batch containing an unknown bid modifies nothing.
#[rstest]
fn batch_update_is_all_or_nothing(
    runtime: io::Result<Runtime>,
    bids: InMemoryBidRepository,
    clock: DefaultClock,
) {
    let rt = runtime.expect("runtime creation");
    let task_id = TaskId::new();
    let mut stored = sample_bid(task_id, &clock);
    rt.block_on(bids.store(&stored)).expect("store");

    stored.reject(&clock).expect("pending to rejected");
    let phantom = sample_bid(task_id, &clock);
    let result = rt.block_on(bids.update_many(&[stored.clone(), phantom.clone()]));
    assert!(
        matches!(result, Err(BidRepositoryError::NotFound(id)) if id == phantom.id()),
        "Should reject the batch on the unknown bid"
    );

    let untouched = rt
        .block_on(bids.find_by_id(stored.id()))
        .expect("lookup")
        .expect("stored bid");
    assert_eq!(
        untouched.status(),
        lobsterwork::marketplace::domain::BidStatus::Pending,
        "Failed batch must leave stored bids unchanged"
    );
}
