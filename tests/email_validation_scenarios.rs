//! Behaviour tests for email validation verdicts.

mod email_validation_steps;

use email_validation_steps::world::{ValidationWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/email_validation.feature",
    name = "Disposable provider is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn disposable_provider_rejected(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/email_validation.feature",
    name = "Free provider is only a warning"
)]
#[tokio::test(flavor = "multi_thread")]
async fn free_provider_warning(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/email_validation.feature",
    name = "Domain without mail exchangers is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn missing_mx_rejected(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/email_validation.feature",
    name = "Business domain with mail exchangers is valid"
)]
#[tokio::test(flavor = "multi_thread")]
async fn business_domain_valid(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/email_validation.feature",
    name = "Malformed input fails before any lookup"
)]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_input_fails_early(world: ValidationWorld) {
    let _ = world;
}
