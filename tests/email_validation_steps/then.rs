//! Then steps for email validation BDD scenarios.

use super::world::ValidationWorld;
use mailvet::validation::domain::ValidationDomainError;
use rstest_bdd_macros::then;

#[then(r#"the status is "{status}""#)]
fn status_is(world: &ValidationWorld, status: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if report.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected status {status}, got {}",
            report.status()
        ));
    }
    Ok(())
}

#[then(r#"the message is "{message}""#)]
fn message_is(world: &ValidationWorld, message: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if report.message() != message {
        return Err(eyre::eyre!(
            "expected message '{message}', got '{}'",
            report.message()
        ));
    }
    Ok(())
}

#[then("validation fails with a malformed input error")]
fn fails_with_malformed_input(world: &ValidationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no validation has run in scenario world"))?;
    if !matches!(result, Err(ValidationDomainError::MalformedEmail(_))) {
        return Err(eyre::eyre!("expected malformed input error, got {result:?}"));
    }
    Ok(())
}

#[then("no DNS lookup was made")]
fn no_dns_lookup(world: &ValidationWorld) -> Result<(), eyre::Report> {
    let count = world.resolver.lookup_count();
    if count != 0 {
        return Err(eyre::eyre!("expected no lookups, saw {count}"));
    }
    Ok(())
}
