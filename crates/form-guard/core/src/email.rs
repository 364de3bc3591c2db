//! Email format validation

use once_cell::sync::Lazy;
use regex::Regex;

/// Email shape accepted by the registration form.
///
/// Character classes are lowercase only: `User@Example.com` is rejected the
/// same way the server-rendered form always rejected it.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$",
    ))
    .expect("email pattern is a valid regex")
});

/// Validates email format
///
/// Checks for:
/// - A dot-separated local part of lowercase letters, digits and RFC 5322 atext symbols
/// - Exactly one '@'
/// - At least two domain labels, none starting or ending with '-'
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
