//! Static domain tables consulted by the membership checkers.

/// Throwaway mailbox services.
pub const DISPOSABLE_DOMAINS: &[&str] =
    &["mailinator.com", "10minutemail.com", "guerrillamail.com"];

/// Denylisted domains.
pub const BLACKLISTED_DOMAINS: &[&str] = &["spamdomain.com", "malicious.org"];

/// Consumer webmail providers.
pub const FREE_PROVIDER_DOMAINS: &[&str] =
    &["gmail.com", "yahoo.com", "outlook.com", "hotmail.com"];

/// Top-level labels that never route mail.
pub const NON_ROUTABLE_TLDS: &[&str] =
    &["example", "invalid", "test", "localhost", "local", "onion"];

/// Reserved or placeholder domains skipped before any lookup.
pub const TEST_DOMAINS: &[&str] = &["example.com", "test.com", "localhost.com", "invalid.com"];

/// Returns whether `domain` is listed in `table`.
///
/// Callers pass already lower-cased domains.
#[must_use]
pub fn contains(table: &[&str], domain: &str) -> bool {
    table.contains(&domain)
}
