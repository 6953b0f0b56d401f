//! Lifecycle tests for the task registry over the full in-memory stack.

use crate::in_memory::helpers::{Stack, grocery_request, register_verified_helper, runtime, stack};
use helphub::geo::GeoPoint;
use helphub::identity::domain::{RatingValue, UserId};
use helphub::task::domain::{Category, TaskStatus};
use helphub::task::services::{CreateTaskRequest, ListOpenFilter};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that a task runs the full lifecycle across registry, queue, and
/// settlement.
#[rstest]
fn full_lifecycle_from_posting_to_rating(runtime: io::Result<Runtime>, stack: Stack) {
    let rt = runtime.expect("runtime creation");
    let mut stack = stack;
    let poster = UserId::new();
    let helper = register_verified_helper(
        &rt,
        &stack.identity,
        "Asha",
        "+91 98450 11111",
        GeoPoint::new(0, 400),
    )
    .expect("helper registration");

    let task = rt
        .block_on(stack.registry.create_task(grocery_request(poster)))
        .expect("create task");
    let request = rt
        .block_on(stack.requests.recv())
        .expect("dispatch request queued");
    assert_eq!(request.task_id(), task.id());

    rt.block_on(stack.registry.claim_task(task.id(), helper))
        .expect("claim");
    rt.block_on(stack.registry.start_task(task.id(), helper))
        .expect("start");
    let completed = rt
        .block_on(stack.registry.submit_proof(
            task.id(),
            helper,
            "Delivered to the door",
            vec!["photos/drop.jpg".to_owned()],
        ))
        .expect("proof");
    assert_eq!(completed.status(), TaskStatus::Completed);
    let proof = completed.proof().expect("proof stored");
    assert_eq!(proof.digest().len(), 64, "sha-256 hex digest");

    let rating = RatingValue::new(5).expect("valid rating");
    let rated = rt
        .block_on(stack.registry.rate_helper(task.id(), poster, rating))
        .expect("rating");
    assert_eq!(rated.helper_rating(), Some(rating));
    assert_eq!(rated.history().len(), 4, "post, claim, start, complete");
}

/// Tests that withdrawing a claim reopens the task and queues a fresh
/// dispatch round.
#[rstest]
fn withdrawal_reopens_and_requeues_the_task(runtime: io::Result<Runtime>, stack: Stack) {
    let rt = runtime.expect("runtime creation");
    let mut stack = stack;
    let first = UserId::new();
    let second = UserId::new();

    let task = rt
        .block_on(stack.registry.create_task(grocery_request(UserId::new())))
        .expect("create task");
    rt.block_on(stack.requests.recv())
        .expect("initial dispatch request");

    rt.block_on(stack.registry.claim_task(task.id(), first))
        .expect("first claim");
    let reopened = rt
        .block_on(stack.registry.withdraw(task.id(), first))
        .expect("withdraw");
    assert_eq!(reopened.status(), TaskStatus::Open);
    assert_eq!(reopened.claimant(), None);

    let requeued = rt
        .block_on(stack.requests.recv())
        .expect("withdrawal queues another round");
    assert_eq!(requeued.task_id(), task.id());

    let reclaimed = rt
        .block_on(stack.registry.claim_task(task.id(), second))
        .expect("second claim");
    assert_eq!(reclaimed.claimant(), Some(second));
}

/// Tests that open listings exclude claimed tasks and honour filters.
#[rstest]
fn open_listings_filter_and_order(runtime: io::Result<Runtime>, stack: Stack) {
    let rt = runtime.expect("runtime creation");
    let stack = stack;
    let poster = UserId::new();

    let groceries = rt
        .block_on(stack.registry.create_task(grocery_request(poster)))
        .expect("groceries task");
    let medicines = rt
        .block_on(
            stack.registry.create_task(
                CreateTaskRequest::new(
                    poster,
                    "Pick up medicines",
                    "Prescription at Apollo pharmacy",
                    GeoPoint::new(500, 0),
                    "3 Residency Road",
                    120,
                )
                .with_category("medicine")
                .with_urgency("urgent"),
            ),
        )
        .expect("medicine task");
    let parcel = rt
        .block_on(
            stack.registry.create_task(
                CreateTaskRequest::new(
                    poster,
                    "Drop off a parcel",
                    "Small box to the courier office",
                    GeoPoint::new(0, 900),
                    "21 Brigade Road",
                    100,
                )
                .with_category("delivery"),
            ),
        )
        .expect("delivery task");
    rt.block_on(stack.registry.claim_task(parcel.id(), UserId::new()))
        .expect("claim the parcel task");

    let open = rt
        .block_on(stack.registry.list_open(ListOpenFilter::new()))
        .expect("list open");
    let ids: Vec<_> = open.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![medicines.id(), groceries.id()], "newest first");

    let urgent_medicine = rt
        .block_on(
            stack
                .registry
                .list_open(ListOpenFilter::new().with_category(Category::Medicine)),
        )
        .expect("filtered list");
    assert_eq!(urgent_medicine.len(), 1);
    assert_eq!(
        urgent_medicine.first().map(|task| task.id()),
        Some(medicines.id())
    );
}
