//! Toast notification model
//!
//! Severity, lifecycle and timing of the transient notifications. Rendering
//! lives in the browser crate; everything here is plain data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Class toggled on a toast to run its enter transition
pub const SHOW_CLASS: &str = "show";

/// Base class of every toast element
pub const TOAST_CLASS: &str = "custom-notification";

/// Presentation rules inserted once per page
pub const NOTIFICATION_STYLES: &str = r#"
.custom-notification {
    position: fixed;
    top: 20px;
    right: 20px;
    padding: 15px 25px;
    border-radius: 8px;
    color: white;
    background-color: #333;
    z-index: 20000;
    box-shadow: 0 5px 15px rgba(0,0,0,0.2);
    opacity: 0;
    transform: translateX(100%);
    transition: opacity 0.3s ease, transform 0.4s cubic-bezier(0.25, 0.8, 0.25, 1);
    font-family: Arial, sans-serif;
    font-size: 15px;
    max-width: 350px;
}
.custom-notification.error { background-color: #d9534f; }
.custom-notification.success { background-color: #5cb85c; }
.custom-notification.show {
    opacity: 1;
    transform: translateX(0);
}
@media (max-width: 600px) {
    .custom-notification {
        left: 10px;
        right: 10px;
        top: 10px;
        max-width: none;
        width: auto;
    }
}
"#;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Success,
    Info,
}

impl Severity {
    /// CSS modifier class for this severity
    pub fn as_class(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Success => "success",
            Severity::Info => "info",
        }
    }

    /// Full class attribute for a toast of this severity
    pub fn toast_class_name(self) -> String {
        format!("{} {}", TOAST_CLASS, self.as_class())
    }
}

/// A message waiting to be shown as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }
}

/// Toast timers, in milliseconds from creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastTimings {
    /// Delay before the `show` class is added
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u32,

    /// Delay before the `show` class is removed and the toast starts hiding
    #[serde(default = "default_hide_after_ms")]
    pub hide_after_ms: u32,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: default_show_delay_ms(),
            hide_after_ms: default_hide_after_ms(),
        }
    }
}

fn default_show_delay_ms() -> u32 {
    10
}

fn default_hide_after_ms() -> u32 {
    5000
}

/// Lifecycle of a single toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Attached to the page, still transparent
    Created,
    /// `show` class applied
    Shown,
    /// `show` class removed, waiting for the exit transition to finish
    Hiding,
    /// Detached from the page
    Removed,
}

/// Things that happen to a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    ShowDelayElapsed,
    HideDelayElapsed,
    TransitionEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("toast event {event:?} is not valid in phase {phase:?}")]
pub struct ToastTransitionError {
    pub phase: ToastPhase,
    pub event: ToastEvent,
}

impl ToastPhase {
    /// Applies an event to the phase.
    ///
    /// A `transitionend` outside of `Hiding` is the enter transition finishing
    /// and leaves the phase alone; only the exit transition removes the toast.
    pub fn advance(self, event: ToastEvent) -> Result<Self, ToastTransitionError> {
        use ToastEvent::*;
        use ToastPhase::*;

        match (self, event) {
            (Created, ShowDelayElapsed) => Ok(Shown),
            (Created | Shown, HideDelayElapsed) => Ok(Hiding),
            (Created | Shown, TransitionEnded) => Ok(self),
            (Hiding, TransitionEnded) => Ok(Removed),
            (phase, event) => Err(ToastTransitionError { phase, event }),
        }
    }

    pub fn is_attached(self) -> bool {
        self != ToastPhase::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_classes() {
        assert_eq!(Severity::default(), Severity::Error);
        assert_eq!(Severity::Error.toast_class_name(), "custom-notification error");
        assert_eq!(Severity::Success.toast_class_name(), "custom-notification success");
        assert_eq!(Severity::Info.toast_class_name(), "custom-notification info");
    }

    #[test]
    fn test_severity_serde() {
        let severity: Severity = serde_json::from_str("\"info\"").unwrap();
        assert_eq!(severity, Severity::Info);
        assert_eq!(serde_json::to_string(&Severity::Success).unwrap(), "\"success\"");
    }

    #[test]
    fn test_default_timings() {
        let timings = ToastTimings::default();
        assert_eq!(timings.show_delay_ms, 10);
        assert_eq!(timings.hide_after_ms, 5000);
    }

    #[test]
    fn test_full_lifecycle() {
        let phase = ToastPhase::Created
            .advance(ToastEvent::ShowDelayElapsed)
            .and_then(|p| p.advance(ToastEvent::TransitionEnded))
            .and_then(|p| p.advance(ToastEvent::HideDelayElapsed))
            .unwrap();
        assert_eq!(phase, ToastPhase::Hiding);
        assert!(phase.is_attached());

        let removed = phase.advance(ToastEvent::TransitionEnded).unwrap();
        assert_eq!(removed, ToastPhase::Removed);
        assert!(!removed.is_attached());
    }

    #[test]
    fn test_hide_timer_does_not_remove() {
        let hiding = ToastPhase::Shown.advance(ToastEvent::HideDelayElapsed).unwrap();
        assert!(hiding.is_attached());
    }

    #[test]
    fn test_removed_is_terminal() {
        let err = ToastPhase::Removed
            .advance(ToastEvent::TransitionEnded)
            .unwrap_err();
        assert_eq!(err.phase, ToastPhase::Removed);
        assert!(ToastPhase::Hiding.advance(ToastEvent::ShowDelayElapsed).is_err());
    }

    #[test]
    fn test_styles_cover_every_severity() {
        assert!(NOTIFICATION_STYLES.contains(".custom-notification.error"));
        assert!(NOTIFICATION_STYLES.contains(".custom-notification.success"));
        assert!(NOTIFICATION_STYLES.contains(".custom-notification.show"));
    }
}
