//! When steps for bulk sync BDD scenarios.

use super::world::{BulkWorld, run_async};
use rstest_bdd_macros::when;

#[when("a bulk validation run completes")]
fn bulk_run_completes(world: &mut BulkWorld) -> Result<(), eyre::Report> {
    let dispatcher = world.dispatcher()?;
    let dispatch = run_async(dispatcher.dispatch_all())
        .map_err(|err| eyre::eyre!("contact fetch failed: {err}"))?;
    world.summary = Some(run_async(dispatch.wait()));
    Ok(())
}

#[when("a bulk validation run is attempted")]
fn bulk_run_attempted(world: &mut BulkWorld) -> Result<(), eyre::Report> {
    let dispatcher = world.dispatcher()?;
    match run_async(dispatcher.dispatch_all()) {
        Ok(dispatch) => world.summary = Some(run_async(dispatch.wait())),
        Err(err) => world.run_error = Some(err),
    }
    Ok(())
}
