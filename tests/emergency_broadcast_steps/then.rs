//! Then steps for emergency broadcast BDD scenarios.

use super::world::{EmergencyWorld, run_async};
use eyre::WrapErr;
use helphub::emergency::domain::{AlertPriority, eta_minutes};
use helphub::task::domain::{Category, TaskStatus, Urgency};
use rstest_bdd_macros::then;

#[then("the backing task is open at emergency urgency")]
fn backing_task_is_open(world: &EmergencyWorld) -> Result<(), eyre::Report> {
    let alert = world.raised_alert()?;
    let task = run_async(world.registry.task(alert.task_id()))
        .wrap_err("load the alert's backing task")?;

    if task.status() != TaskStatus::Open {
        return Err(eyre::eyre!("expected an open task, got {}", task.status()));
    }
    if task.urgency() != Urgency::Emergency {
        return Err(eyre::eyre!(
            "expected emergency urgency, got {}",
            task.urgency()
        ));
    }
    if task.category() != Category::Emergency {
        return Err(eyre::eyre!(
            "expected the emergency category, got {}",
            task.category()
        ));
    }

    Ok(())
}

#[then("the alert broadcasts with critical priority")]
fn alert_is_critical(world: &EmergencyWorld) -> Result<(), eyre::Report> {
    let alert = world.raised_alert()?;
    if alert.priority() != AlertPriority::Critical {
        return Err(eyre::eyre!(
            "expected critical priority, got {}",
            alert.priority()
        ));
    }

    let stored = run_async(world.emergency.alert(alert.task_id()))
        .wrap_err("read the alert back from the store")?;
    if stored != *alert {
        return Err(eyre::eyre!("the stored alert differs from the raised one"));
    }

    Ok(())
}

#[then("the alert lists one responder {distance:u64} metres out")]
fn alert_lists_one_responder(world: &EmergencyWorld, distance: u64) -> Result<(), eyre::Report> {
    let alert = world.raised_alert()?;
    let responders = run_async(world.emergency.responders(alert.task_id()))
        .wrap_err("list the alert's responders")?;

    let [responder] = responders.as_slice() else {
        return Err(eyre::eyre!(
            "expected exactly one responder, got {}",
            responders.len()
        ));
    };
    if Some(responder.helper) != world.helper {
        return Err(eyre::eyre!("the responder is not the registered helper"));
    }
    if responder.distance_m != distance {
        return Err(eyre::eyre!(
            "expected the responder {distance} metres out, got {}",
            responder.distance_m
        ));
    }
    if responder.eta_minutes != eta_minutes(distance) {
        return Err(eyre::eyre!(
            "expected an eta of {} minutes, got {}",
            eta_minutes(distance),
            responder.eta_minutes
        ));
    }

    Ok(())
}
