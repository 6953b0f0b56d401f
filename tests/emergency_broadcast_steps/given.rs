//! Given steps for emergency broadcast BDD scenarios.

use super::world::{EmergencyWorld, raise_medical, run_async};
use eyre::WrapErr;
use helphub::geo::GeoPoint;
use helphub::identity::domain::VerificationKind;
use helphub::identity::services::RegisterUserRequest;
use rstest_bdd_macros::given;

#[given("a phone-verified helper {distance:u64} metres away")]
fn phone_verified_helper(world: &mut EmergencyWorld, distance: u64) -> Result<(), eyre::Report> {
    let north_m = i64::try_from(distance).wrap_err("helper distance fits the city grid")?;
    let user = run_async(world.identity.register(RegisterUserRequest::new(
        "Asha",
        "+91 98450 12345",
        "Bengaluru",
        GeoPoint::new(0, north_m),
    )))
    .wrap_err("register the helper")?;
    run_async(
        world
            .identity
            .mark_verified(user.id(), VerificationKind::Phone),
    )
    .wrap_err("verify the helper's phone")?;
    world.helper = Some(user.id());
    Ok(())
}

#[given(r#"a medical emergency raised from "{address}""#)]
fn medical_emergency_raised(
    world: &mut EmergencyWorld,
    address: String,
) -> Result<(), eyre::Report> {
    raise_medical(world, &address)
}
