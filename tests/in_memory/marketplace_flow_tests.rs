//! End-to-end lifecycle tests driving the service the way the
//! application does: signed-in users post, browse, bid, and accept.

use crate::in_memory::helpers::{
    identity, post_request, runtime, service, sign_in, MemoryService,
};
use lobsterwork::identity::adapters::memory::InMemoryIdentityProvider;
use lobsterwork::marketplace::{
    domain::{BidStatus, Category, TaskStatus, WorkerType},
    ports::TaskFilter,
    services::{ErrorKind, SubmitBidRequest},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests the full happy path from sign-in to completion.
#[rstest]
fn posted_task_runs_to_completion(
    runtime: io::Result<Runtime>,
    service: MemoryService,
    identity: InMemoryIdentityProvider,
) {
    let rt = runtime.expect("runtime creation");
    let poster = sign_in(&rt, &identity, "poster@example.com", "Poster").expect("poster sign-in");
    let human = sign_in(&rt, &identity, "human@example.com", "Human").expect("human sign-in");
    let agent = sign_in(&rt, &identity, "agent@example.com", "Agent").expect("agent sign-in");

    let task = rt
        .block_on(service.post_task(
            poster.id(),
            post_request()
                .with_category(Category::Data)
                .with_preferred_worker_type(WorkerType::Agent),
        ))
        .expect("post task");

    let open_data_tasks = rt
        .block_on(service.list_tasks(
            &TaskFilter::new()
                .with_status(TaskStatus::Open)
                .with_category(Category::Data),
        ))
        .expect("browse tasks");
    assert_eq!(open_data_tasks.len(), 1);
    assert_eq!(open_data_tasks[0].id(), task.id());

    rt.block_on(service.submit_bid(
        task.id(),
        human.id(),
        SubmitBidRequest::new(18_000, "Manual collection with spot checks"),
    ))
    .expect("human bid");
    let winning = rt
        .block_on(service.submit_bid(
            task.id(),
            agent.id(),
            SubmitBidRequest::new(9_000, "Scheduled scraper with retry handling")
                .with_estimated_hours(12),
        ))
        .expect("agent bid");

    let in_progress = rt
        .block_on(service.accept_bid(task.id(), poster.id(), winning.id()))
        .expect("accept bid");
    assert_eq!(in_progress.status(), TaskStatus::InProgress);

    let resolved = rt
        .block_on(service.list_bids_for_task(task.id()))
        .expect("list bids");
    assert_eq!(resolved.len(), 2);
    for bid in &resolved {
        let expected = if bid.id() == winning.id() {
            BidStatus::Accepted
        } else {
            BidStatus::Rejected
        };
        assert_eq!(bid.status(), expected);
    }

    let completed = rt
        .block_on(service.complete_task(task.id(), poster.id()))
        .expect("complete task");
    assert_eq!(completed.status(), TaskStatus::Completed);

    let still_open = rt
        .block_on(service.list_tasks(&TaskFilter::new().with_status(TaskStatus::Open)))
        .expect("browse open tasks");
    assert!(still_open.is_empty());
}

/// Tests that a closed task turns away both new bids and late acceptances.
#[rstest]
fn closed_task_turns_away_late_activity(
    runtime: io::Result<Runtime>,
    service: MemoryService,
    identity: InMemoryIdentityProvider,
) {
    let rt = runtime.expect("runtime creation");
    let poster = sign_in(&rt, &identity, "poster@example.com", "Poster").expect("poster sign-in");
    let bidder = sign_in(&rt, &identity, "bidder@example.com", "Bidder").expect("bidder sign-in");

    let task = rt
        .block_on(service.post_task(poster.id(), post_request()))
        .expect("post task");
    let early = rt
        .block_on(service.submit_bid(
            task.id(),
            bidder.id(),
            SubmitBidRequest::new(10_000, "On it"),
        ))
        .expect("early bid");

    let cancelled = rt
        .block_on(service.cancel_task(task.id(), poster.id()))
        .expect("cancel task");
    assert_eq!(cancelled.status(), TaskStatus::Cancelled);

    let late_bid = rt.block_on(service.submit_bid(
        task.id(),
        bidder.id(),
        SubmitBidRequest::new(8_000, "Cheaper offer"),
    ));
    let late_err = late_bid.expect_err("bid on a cancelled task");
    assert_eq!(late_err.kind(), ErrorKind::Forbidden);

    let late_accept = rt.block_on(service.accept_bid(task.id(), poster.id(), early.id()));
    let accept_err = late_accept.expect_err("acceptance on a cancelled task");
    assert_eq!(accept_err.kind(), ErrorKind::Conflict);

    let bids = rt
        .block_on(service.list_bids_for_task(task.id()))
        .expect("list bids");
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].status(), BidStatus::Rejected);
}

/// Tests that bids made across several tasks show up in the bidder view.
#[rstest]
fn bidder_view_spans_tasks(
    runtime: io::Result<Runtime>,
    service: MemoryService,
    identity: InMemoryIdentityProvider,
) {
    let rt = runtime.expect("runtime creation");
    let poster = sign_in(&rt, &identity, "poster@example.com", "Poster").expect("poster sign-in");
    let bidder = sign_in(&rt, &identity, "bidder@example.com", "Bidder").expect("bidder sign-in");

    let mut task_ids = Vec::new();
    for _ in 0..3 {
        let task = rt
            .block_on(service.post_task(poster.id(), post_request()))
            .expect("post task");
        rt.block_on(service.submit_bid(
            task.id(),
            bidder.id(),
            SubmitBidRequest::new(10_000, "On it"),
        ))
        .expect("submit bid");
        task_ids.push(task.id());
    }

    let mine = rt
        .block_on(service.list_bids_for_bidder(bidder.id()))
        .expect("bidder view");
    assert_eq!(mine.len(), 3);
    let mut covered: Vec<_> = mine.iter().map(|bid| bid.task_id()).collect();
    covered.sort();
    task_ids.sort();
    assert_eq!(covered, task_ids);
}
