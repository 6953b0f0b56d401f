//! Trust settlement tests over the full in-memory stack.

use crate::in_memory::helpers::{Stack, grocery_request, register_verified_helper, runtime, stack};
use helphub::geo::GeoPoint;
use helphub::identity::domain::{Badge, RatingValue, UserId};
use helphub::task::services::CreateTaskRequest;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that a settled completion and a rating feed the helper's trust
/// score.
#[rstest]
fn completions_and_ratings_grow_the_helper_trust(runtime: io::Result<Runtime>, stack: Stack) {
    let rt = runtime.expect("runtime creation");
    let poster = UserId::new();
    let helper = register_verified_helper(
        &rt,
        &stack.identity,
        "Asha",
        "+91 98450 11111",
        GeoPoint::new(0, 400),
    )
    .expect("helper registration");
    let before = rt
        .block_on(stack.identity.profile(helper))
        .expect("profile lookup");
    assert_eq!(before.trust_score(), 10, "phone verification alone");

    let task = rt
        .block_on(stack.registry.create_task(grocery_request(poster)))
        .expect("create task");
    rt.block_on(stack.registry.claim_task(task.id(), helper))
        .expect("claim");
    rt.block_on(stack.registry.start_task(task.id(), helper))
        .expect("start");
    rt.block_on(stack.registry.submit_proof(
        task.id(),
        helper,
        "Delivered to the door",
        Vec::new(),
    ))
    .expect("proof");

    let settled = rt
        .block_on(stack.identity.profile(helper))
        .expect("profile lookup");
    assert_eq!(settled.completed_tasks(), 1);
    assert_eq!(settled.earnings_rupees(), 150);
    assert_eq!(settled.fast_claims(), 1, "claimed within the fast window");
    assert_eq!(settled.trust_score(), 12, "verification plus one completion");

    let rating = RatingValue::new(5).expect("valid rating");
    rt.block_on(stack.registry.rate_helper(task.id(), poster, rating))
        .expect("rating");
    let rated = rt
        .block_on(stack.identity.profile(helper))
        .expect("profile lookup");
    assert_eq!(rated.rating().samples(), 1);
    assert_eq!(rated.rating().centistars(), 500);
    assert_eq!(
        rated.trust_score(),
        37,
        "verification, one completion, and a five-star average"
    );
}

/// Tests that three settled emergency completions earn the Emergency
/// Hero badge.
#[rstest]
fn emergency_completions_earn_the_emergency_hero_badge(
    runtime: io::Result<Runtime>,
    stack: Stack,
) {
    let rt = runtime.expect("runtime creation");
    let helper = register_verified_helper(
        &rt,
        &stack.identity,
        "Asha",
        "+91 98450 11111",
        GeoPoint::new(0, 400),
    )
    .expect("helper registration");

    for round in 0..3 {
        let task = rt
            .block_on(
                stack.registry.create_task(
                    CreateTaskRequest::new(
                        UserId::new(),
                        "Need a tow",
                        "Car broke down on the flyover",
                        GeoPoint::new(0, 0),
                        "Silk Board flyover",
                        200,
                    )
                    .with_category("emergency")
                    .with_urgency("emergency"),
                ),
            )
            .expect("create emergency task");
        rt.block_on(stack.registry.claim_task(task.id(), helper))
            .expect("claim");
        rt.block_on(stack.registry.start_task(task.id(), helper))
            .expect("start");
        rt.block_on(stack.registry.submit_proof(
            task.id(),
            helper,
            format!("Towed the car, round {round}"),
            Vec::new(),
        ))
        .expect("proof");
    }

    let profile = rt
        .block_on(stack.identity.profile(helper))
        .expect("profile lookup");
    assert_eq!(profile.emergency_completions(), 3);
    assert_eq!(profile.earnings_rupees(), 600);

    let badges = rt
        .block_on(stack.identity.badges(helper))
        .expect("badge lookup");
    assert_eq!(badges, vec![Badge::EmergencyHero]);
}
