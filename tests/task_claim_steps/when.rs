//! When steps for task claim BDD scenarios.

use super::world::{TaskClaimWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"helper "{name}" claims the task"#)]
fn helper_claims(world: &mut TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = world.helper(&name);
    let result = run_async(world.registry.claim_task(task_id, helper));
    if let Ok(ref claimed) = result {
        world.task = Some(claimed.clone());
    }
    world.last_claim_result = Some(result);
    Ok(())
}

#[when(r#"helper "{name}" starts the task"#)]
fn helper_starts(world: &mut TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = world.helper(&name);
    let started = run_async(world.registry.start_task(task_id, helper))
        .wrap_err("start task in scenario")?;
    world.task = Some(started);
    Ok(())
}

#[when(r#"helper "{name}" submits proof "{note}""#)]
fn helper_submits_proof(
    world: &mut TaskClaimWorld,
    name: String,
    note: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = world.helper(&name);
    let completed = run_async(
        world
            .registry
            .submit_proof(task_id, helper, note, Vec::new()),
    )
    .wrap_err("submit proof in scenario")?;
    world.task = Some(completed);
    Ok(())
}

#[when(r#"helper "{name}" withdraws from the task"#)]
fn helper_withdraws(world: &mut TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = world.helper(&name);
    let reopened = run_async(world.registry.withdraw(task_id, helper))
        .wrap_err("withdraw claim in scenario")?;
    world.task = Some(reopened);
    Ok(())
}
