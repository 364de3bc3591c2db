//! Page lifecycle

use thiserror::Error;

/// Where the registration page is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// Listeners not yet attached
    #[default]
    Loaded,
    /// Flash messages relayed, handlers live
    Interactive,
    /// Submit gate running
    Submitting,
    /// Gate refused the submission; the page keeps accepting input
    Blocked,
    /// Native submission under way
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    FlashRelayed,
    Interaction,
    SubmitRequested,
    GateBlocked,
    GatePassed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("page event {event:?} is not valid in state {state:?}")]
pub struct StateError {
    pub state: PageState,
    pub event: PageEvent,
}

impl PageState {
    pub fn next(self, event: PageEvent) -> Result<Self, StateError> {
        use PageEvent::*;
        use PageState::*;

        match (self, event) {
            (Loaded, FlashRelayed) => Ok(Interactive),
            (Interactive | Blocked, Interaction) => Ok(Interactive),
            (Interactive | Blocked, SubmitRequested) => Ok(Submitting),
            (Submitting, GateBlocked) => Ok(Blocked),
            (Submitting, GatePassed) => Ok(Submitted),
            (state, event) => Err(StateError { state, event }),
        }
    }

    /// Whether field handlers should still react
    pub fn accepts_input(self) -> bool {
        matches!(self, PageState::Interactive | PageState::Blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_submission_returns_to_interactive() {
        let state = PageState::Loaded
            .next(PageEvent::FlashRelayed)
            .and_then(|s| s.next(PageEvent::SubmitRequested))
            .and_then(|s| s.next(PageEvent::GateBlocked))
            .unwrap();
        assert_eq!(state, PageState::Blocked);
        assert!(state.accepts_input());

        assert_eq!(state.next(PageEvent::Interaction), Ok(PageState::Interactive));
        assert_eq!(state.next(PageEvent::SubmitRequested), Ok(PageState::Submitting));
    }

    #[test]
    fn test_passed_submission_is_final() {
        let submitted = PageState::Submitting.next(PageEvent::GatePassed).unwrap();
        assert_eq!(submitted, PageState::Submitted);
        assert!(!submitted.accepts_input());

        let err = submitted.next(PageEvent::SubmitRequested).unwrap_err();
        assert_eq!(err.state, PageState::Submitted);
    }

    #[test]
    fn test_flash_relay_fires_once() {
        assert!(PageState::Interactive.next(PageEvent::FlashRelayed).is_err());
    }

    #[test]
    fn test_no_submit_before_load_completes() {
        assert!(PageState::Loaded.next(PageEvent::SubmitRequested).is_err());
        assert!(!PageState::Loaded.accepts_input());
    }
}
