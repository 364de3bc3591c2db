//! Input sanitizers

/// Strips every non-digit character.
///
/// Only ASCII digits survive, matching what a numeric form field accepts.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Number of ASCII digits in a value
pub fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}
