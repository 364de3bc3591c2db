//! Password validation and visibility toggling

use crate::toast::Notice;

/// Minimum number of characters in a password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols that satisfy the "one special character" requirement
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*._-";

/// Individual password requirements, checked in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRequirement {
    /// No line terminators anywhere in the value
    SingleLine,
    /// 8+ characters
    MinLength,
    /// At least one ASCII lowercase letter
    Lowercase,
    /// At least one ASCII uppercase letter
    Uppercase,
    /// At least one ASCII digit
    Digit,
    /// At least one of `!@#$%^&*._-`
    Symbol,
}

impl PasswordRequirement {
    fn is_met(self, password: &str) -> bool {
        match self {
            Self::SingleLine => !password
                .chars()
                .any(|c| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')),
            Self::MinLength => password.chars().count() >= MIN_PASSWORD_LENGTH,
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Digit => password.chars().any(|c| c.is_ascii_digit()),
            Self::Symbol => password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }
}

const REQUIREMENTS: [PasswordRequirement; 6] = [
    PasswordRequirement::SingleLine,
    PasswordRequirement::MinLength,
    PasswordRequirement::Lowercase,
    PasswordRequirement::Uppercase,
    PasswordRequirement::Digit,
    PasswordRequirement::Symbol,
];

/// Validates password strength
///
/// Returns the first requirement the password misses.
pub fn check_password_strength(password: &str) -> Result<(), PasswordRequirement> {
    match REQUIREMENTS.iter().find(|req| !req.is_met(password)) {
        Some(missing) => Err(*missing),
        None => Ok(()),
    }
}

/// Blur-time password feedback: nothing for an empty or strong password,
/// an error notice carrying `message` otherwise.
pub fn password_notice(password: &str, message: &str) -> Option<Notice> {
    if password.is_empty() {
        return None;
    }

    match check_password_strength(password) {
        Ok(()) => None,
        Err(missing) => {
            tracing::debug!(?missing, "password rejected");
            Some(Notice::error(message))
        }
    }
}

/// Visibility of the password input, flipped by the eye icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVisibility {
    Hidden,
    Visible,
}

impl PasswordVisibility {
    /// Reads the current state from the input's `type` attribute.
    /// Anything other than `password` counts as visible.
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type == "password" {
            Self::Hidden
        } else {
            Self::Visible
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        }
    }

    /// Value for the input's `type` attribute
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Hidden => "password",
            Self::Visible => "text",
        }
    }

    /// Icon class to show for this state, and the one to drop
    pub fn icon_classes(self) -> (&'static str, &'static str) {
        match self {
            Self::Visible => ("fa-eye", "fa-eye-slash"),
            Self::Hidden => ("fa-eye-slash", "fa-eye"),
        }
    }
}
