//! Given steps for task claim BDD scenarios.

use super::world::{TaskClaimWorld, run_async};
use eyre::WrapErr;
use helphub::geo::GeoPoint;
use helphub::identity::domain::UserId;
use helphub::task::services::CreateTaskRequest;
use rstest_bdd_macros::given;

#[given(r#"an open task "{title}" paying {price:u64} rupees"#)]
fn open_task(world: &mut TaskClaimWorld, title: String, price: u64) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(
        UserId::new(),
        title,
        "Posted for a behaviour scenario",
        GeoPoint::new(0, 0),
        "12 MG Road, Indiranagar",
        price,
    )
    .with_category("groceries");
    let task = run_async(world.registry.create_task(request))
        .wrap_err("create task for claim scenario")?;
    world.task = Some(task);
    Ok(())
}

#[given(r#"helper "{name}" has claimed the task"#)]
fn helper_has_claimed(world: &mut TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = world.helper(&name);
    let claimed = run_async(world.registry.claim_task(task_id, helper))
        .wrap_err("claim task in scenario setup")?;
    world.task = Some(claimed);
    Ok(())
}
