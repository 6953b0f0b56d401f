//! Concurrency tests for claim arbitration.

use crate::in_memory::helpers::{Stack, grocery_request, stack};
use helphub::identity::domain::UserId;
use helphub::task::services::TaskRegistryError;
use rstest::rstest;
use std::sync::Arc;
use tokio::sync::Barrier;

/// Tests that exactly one of several simultaneous claims wins and the
/// rest surface as conflicts.
#[rstest]
fn concurrent_claims_elect_a_single_winner(stack: Stack) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("runtime creation");
    let task = rt
        .block_on(stack.registry.create_task(grocery_request(UserId::new())))
        .expect("create task");

    let helpers: Vec<UserId> = (0..4).map(|_| UserId::new()).collect();
    let barrier = Arc::new(Barrier::new(helpers.len()));
    let handles: Vec<_> = helpers
        .iter()
        .map(|&helper| {
            let registry = Arc::clone(&stack.registry);
            let barrier = Arc::clone(&barrier);
            let task_id = task.id();
            rt.spawn(async move {
                barrier.wait().await;
                (helper, registry.claim_task(task_id, helper).await)
            })
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| rt.block_on(handle).expect("claimant should not panic"))
        .collect();

    let winners: Vec<UserId> = results
        .iter()
        .filter(|(_, result)| result.is_ok())
        .map(|(helper, _)| *helper)
        .collect();
    assert_eq!(winners.len(), 1, "exactly one claim wins");
    for (_, result) in &results {
        match result {
            Ok(claimed) => assert_eq!(claimed.claimant(), winners.first().copied()),
            Err(err) => assert!(matches!(err, TaskRegistryError::Conflict(_))),
        }
    }

    let stored = rt
        .block_on(stack.registry.task(task.id()))
        .expect("task lookup");
    assert_eq!(stored.claimant(), winners.first().copied());
}
