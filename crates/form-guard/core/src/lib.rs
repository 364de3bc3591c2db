//! FormGuard Core
//!
//! Pure Rust validation and feedback rules for the entrepreneur registration form.
//! Used by the WASM crate for client-side wiring and testable natively without a browser.

pub mod availability;
pub mod config;
pub mod email;
pub mod form;
pub mod gate;
pub mod password;
pub mod sanitize;
pub mod state;
pub mod toast;

// Re-export the types the browser layer works with
pub use availability::{
    AvailabilityClient, AvailabilityError, AvailabilityRequest, AvailabilityResponse, BlurOutcome,
    EmailCheck, RequestToken, RequestTokens,
};
pub use config::{GuardConfig, Messages, Selectors};
pub use email::is_valid_email;
pub use form::{humanize_field_name, FieldRef, FormView};
pub use gate::{Rule, SubmitGate, Violation};
pub use password::{check_password_strength, password_notice, PasswordRequirement, PasswordVisibility};
pub use sanitize::digits_only;
pub use state::{PageEvent, PageState, StateError};
pub use toast::{Notice, Severity, ToastEvent, ToastPhase, ToastTimings, NOTIFICATION_STYLES, SHOW_CLASS};
