//! Given steps for email validation BDD scenarios.

use super::world::ValidationWorld;
use rstest_bdd_macros::given;

#[given(r#"the domain "{domain}" publishes mail exchangers"#)]
fn domain_publishes_mx(world: &mut ValidationWorld, domain: String) -> Result<(), eyre::Report> {
    let exchanger = format!("mx1.{domain}");
    world
        .resolver
        .set_records(domain, vec![exchanger])
        .map_err(|err| eyre::eyre!("resolver setup failed: {err}"))
}
