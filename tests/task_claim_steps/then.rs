//! Then steps for task claim BDD scenarios.

use super::world::{TaskClaimWorld, run_async};
use eyre::WrapErr;
use helphub::identity::domain::UserId;
use helphub::task::{domain::TaskDomainError, services::TaskRegistryError};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskClaimWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let stored = run_async(world.registry.task(task_id)).wrap_err("reload scenario task")?;
    if stored.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, found {}",
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the completion proof carries a digest")]
fn proof_carries_digest(world: &TaskClaimWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let stored = run_async(world.registry.task(task_id)).wrap_err("reload scenario task")?;
    let proof = stored
        .proof()
        .ok_or_else(|| eyre::eyre!("completed task has no proof"))?;
    if proof.digest().len() != 64 {
        return Err(eyre::eyre!(
            "expected a sha-256 hex digest, found {}",
            proof.digest()
        ));
    }
    Ok(())
}

#[then("the claim fails because the task is already claimed")]
fn claim_fails_already_claimed(world: &TaskClaimWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_claim_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing claim result"))?;
    if !matches!(
        result,
        Err(TaskRegistryError::Conflict(
            TaskDomainError::AlreadyClaimed { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected an already-claimed conflict, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the task is still claimed by "{name}""#)]
fn task_still_claimed_by(world: &TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = world.helper_named(&name)?;
    let stored = run_async(world.registry.task(task_id)).wrap_err("reload scenario task")?;
    if stored.claimant() != Some(helper) {
        return Err(eyre::eyre!("expected {name} to hold the claim"));
    }
    Ok(())
}

#[then(r#"helper "{name}" can claim the task"#)]
fn helper_can_claim(world: &TaskClaimWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let helper = UserId::new();
    let claimed = run_async(world.registry.claim_task(task_id, helper))
        .wrap_err_with(|| format!("{name} claims the reopened task"))?;
    if claimed.claimant() != Some(helper) {
        return Err(eyre::eyre!("expected {name} to hold the new claim"));
    }
    Ok(())
}
