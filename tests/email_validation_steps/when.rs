//! When steps for email validation BDD scenarios.

use super::world::{ValidationWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#""{email}" is validated"#)]
fn email_is_validated(world: &mut ValidationWorld, email: String) {
    let service = world.service();
    world.last_result = Some(run_async(service.evaluate(&email)));
}
