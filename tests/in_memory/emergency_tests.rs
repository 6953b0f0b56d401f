//! Emergency broadcast tests over the full in-memory stack.

use crate::in_memory::helpers::{Stack, register_verified_helper, runtime, stack};
use helphub::dispatch::domain::HelperReply;
use helphub::emergency::domain::{AlertPriority, AlertStatus, EmergencyKind};
use helphub::emergency::services::CreateAlertRequest;
use helphub::geo::GeoPoint;
use helphub::identity::domain::UserId;
use helphub::task::domain::{Category, TaskStatus, Urgency};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Tests that raising an alert opens a pre-filled emergency task and
/// broadcasts past the normal radius.
#[rstest]
fn raising_an_alert_opens_and_broadcasts_an_emergency_task(
    runtime: io::Result<Runtime>,
    stack: Stack,
) {
    let rt = runtime.expect("runtime creation");
    let mut stack = stack;
    let nearer = register_verified_helper(
        &rt,
        &stack.identity,
        "Asha",
        "+91 98450 11111",
        GeoPoint::new(0, 2600),
    )
    .expect("nearer helper");
    let farther = register_verified_helper(
        &rt,
        &stack.identity,
        "Binod",
        "+91 98450 22222",
        GeoPoint::new(0, 4800),
    )
    .expect("farther helper");
    let requester = UserId::new();

    let alert = rt
        .block_on(stack.emergency.create_alert(CreateAlertRequest::new(
            requester,
            EmergencyKind::Medical,
            GeoPoint::new(0, 0),
            "44 Hospital Road",
            "+91 98450 99999",
        )))
        .expect("alert creation");
    assert_eq!(alert.priority(), AlertPriority::Critical);

    let task = rt
        .block_on(stack.registry.task(alert.task_id()))
        .expect("backing task");
    assert_eq!(task.poster(), requester);
    assert_eq!(task.title(), "Medical emergency");
    assert_eq!(task.category(), Category::Emergency);
    assert_eq!(task.urgency(), Urgency::Emergency);
    assert_eq!(task.price().rupees(), 150, "suggested emergency price");
    assert_eq!(task.dispatch_radius_m(), Some(5000));

    let request = rt
        .block_on(stack.requests.recv())
        .expect("dispatch request queued");
    assert_eq!(request.radius_m(), Some(5000));
    let outcome = rt
        .block_on(stack.engine.dispatch(request))
        .expect("dispatch round");
    let notified: Vec<UserId> = outcome
        .notifications
        .iter()
        .map(|notification| notification.helper())
        .collect();
    assert_eq!(
        notified,
        vec![nearer, farther],
        "emergency radius reaches helpers beyond the normal tier"
    );

    let status = rt
        .block_on(stack.emergency.alert_status(alert.task_id()))
        .expect("status projection");
    assert_eq!(
        status,
        AlertStatus {
            task_status: TaskStatus::Open,
            notified: 2,
            responded: 0,
            en_route: 0,
        }
    );
}

/// Tests that accepted notifications surface as responders with arrival
/// estimates.
#[rstest]
fn accepting_responders_appear_with_arrival_estimates(
    runtime: io::Result<Runtime>,
    stack: Stack,
) {
    let rt = runtime.expect("runtime creation");
    let mut stack = stack;
    let responder = register_verified_helper(
        &rt,
        &stack.identity,
        "Asha",
        "+91 98450 11111",
        GeoPoint::new(0, 2600),
    )
    .expect("helper registration");

    let alert = rt
        .block_on(stack.emergency.create_alert(CreateAlertRequest::new(
            UserId::new(),
            EmergencyKind::Stranded,
            GeoPoint::new(0, 0),
            "NICE Road toll gate",
            "+91 98450 99999",
        )))
        .expect("alert creation");
    let request = rt
        .block_on(stack.requests.recv())
        .expect("dispatch request queued");
    let outcome = rt
        .block_on(stack.engine.dispatch(request))
        .expect("dispatch round");
    let notification = outcome
        .notifications
        .first()
        .expect("one notification sent");

    rt.block_on(
        stack
            .engine
            .record_response(notification.id(), HelperReply::Accept),
    )
    .expect("accept recorded");

    let status = rt
        .block_on(stack.emergency.alert_status(alert.task_id()))
        .expect("status projection");
    assert_eq!(
        status,
        AlertStatus {
            task_status: TaskStatus::Accepted,
            notified: 1,
            responded: 1,
            en_route: 1,
        }
    );

    let responders = rt
        .block_on(stack.emergency.responders(alert.task_id()))
        .expect("responder projection");
    assert_eq!(responders.len(), 1);
    let summary = responders.first().expect("one responder listed");
    assert_eq!(summary.helper, responder);
    assert_eq!(summary.distance_m, 2600);
    assert_eq!(summary.trust_score, 10, "phone verification alone");
    assert_eq!(summary.eta_minutes, 10);
}
