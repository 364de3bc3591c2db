//! Email availability check
//!
//! Blur-time email feedback: local format validation first, then one request
//! to the registration endpoint asking whether the address is still free.
//! Transport failures degrade to an informational notice and never block the
//! form. Responses to checks superseded by a newer blur are dropped.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use thiserror::Error;

use crate::config::Messages;
use crate::email::is_valid_email;
use crate::toast::Notice;

/// JSON body POSTed to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// Tells the endpoint this is a check, not a registration
    pub check_email: bool,
    pub email: String,
}

impl AvailabilityRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            check_email: true,
            email: email.into(),
        }
    }
}

/// JSON body the endpoint answers with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Why an availability check produced no answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvailabilityError {
    #[error("network error: {0}")]
    Network(String),

    #[error("endpoint answered with HTTP {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

/// Transport for availability checks
///
/// Futures are not `Send`: the browser implementation holds JS handles.
#[async_trait(?Send)]
pub trait AvailabilityClient {
    async fn check(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityResponse, AvailabilityError>;
}

/// Identifies one issued check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Monotonic request counter; only the newest token is current
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: Cell<u64>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new token, superseding every earlier one
    pub fn issue(&self) -> RequestToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestToken(next)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.get() == token.0
    }
}

/// Email blur handler logic
pub struct EmailCheck<C> {
    client: C,
    tokens: RequestTokens,
    messages: Messages,
}

impl<C: AvailabilityClient> EmailCheck<C> {
    pub fn new(client: C, messages: Messages) -> Self {
        Self {
            client,
            tokens: RequestTokens::new(),
            messages,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Synchronous half of a blur.
    ///
    /// Every blur takes a fresh token, including empty and malformed values,
    /// so any lookup still in flight from an earlier blur becomes stale.
    pub fn begin(&self, email: &str) -> BlurOutcome {
        let token = self.tokens.issue();

        if email.is_empty() {
            return BlurOutcome::Skip;
        }

        if !is_valid_email(email) {
            return BlurOutcome::Invalid(Notice::error(self.messages.email_format.clone()));
        }

        BlurOutcome::Lookup(token)
    }

    /// Asks the server about `email` and maps the answer to a notice.
    ///
    /// Returns `None` for an available address or when `token` was
    /// superseded while the request was in flight.
    pub async fn lookup(&self, email: &str, token: RequestToken) -> Option<Notice> {
        let outcome = self.client.check(&AvailabilityRequest::new(email)).await;

        if !self.tokens.is_current(token) {
            tracing::debug!(?token, "discarding superseded availability response");
            return None;
        }

        match outcome {
            Ok(response) if response.available => None,
            Ok(response) => Some(Notice::error(
                response
                    .message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| self.messages.email_taken.clone()),
            )),
            Err(err) => {
                tracing::error!("Error checking email availability: {}", err);
                Some(Notice::info(self.messages.email_check_failed.clone()))
            }
        }
    }

    /// Produces the notice to show for `email`, if any
    pub async fn on_blur(&self, email: &str) -> Option<Notice> {
        match self.begin(email) {
            BlurOutcome::Skip => None,
            BlurOutcome::Invalid(notice) => Some(notice),
            BlurOutcome::Lookup(token) => self.lookup(email, token).await,
        }
    }
}

/// What a blur resolves to before any network traffic
#[derive(Debug, Clone, PartialEq)]
pub enum BlurOutcome {
    /// Empty field
    Skip,
    /// Bad format; shown right away
    Invalid(Notice),
    /// Needs a server check under this token
    Lookup(RequestToken),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::Severity;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    /// Answers each check with the next scripted outcome
    #[derive(Default)]
    struct ScriptedClient {
        outcomes: RefCell<VecDeque<Result<AvailabilityResponse, AvailabilityError>>>,
        requests: RefCell<Vec<AvailabilityRequest>>,
    }

    impl ScriptedClient {
        fn answering(outcome: Result<AvailabilityResponse, AvailabilityError>) -> Self {
            let client = Self::default();
            client.outcomes.borrow_mut().push_back(outcome);
            client
        }
    }

    #[async_trait(?Send)]
    impl AvailabilityClient for ScriptedClient {
        async fn check(
            &self,
            request: &AvailabilityRequest,
        ) -> Result<AvailabilityResponse, AvailabilityError> {
            self.requests.borrow_mut().push(request.clone());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(AvailabilityError::Network("no scripted outcome".into())))
        }
    }

    /// Each check waits for a response sent by the test
    #[derive(Default)]
    struct ManualClient {
        pending: RefCell<VecDeque<oneshot::Receiver<AvailabilityResponse>>>,
    }

    #[async_trait(?Send)]
    impl AvailabilityClient for ManualClient {
        async fn check(
            &self,
            _request: &AvailabilityRequest,
        ) -> Result<AvailabilityResponse, AvailabilityError> {
            let receiver = self
                .pending
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| AvailabilityError::Network("unexpected check".into()))?;
            receiver
                .await
                .map_err(|err| AvailabilityError::Network(err.to_string()))
        }
    }

    fn taken(message: Option<&str>) -> AvailabilityResponse {
        AvailabilityResponse {
            available: false,
            message: message.map(str::to_string),
        }
    }

    fn available() -> AvailabilityResponse {
        AvailabilityResponse {
            available: true,
            message: None,
        }
    }

    #[test]
    fn test_request_wire_format() {
        let body = serde_json::to_value(AvailabilityRequest::new("user@example.com")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"check_email": true, "email": "user@example.com"})
        );
    }

    #[test]
    fn test_response_message_is_optional() {
        let response: AvailabilityResponse =
            serde_json::from_str(r#"{"available": true}"#).unwrap();
        assert_eq!(response, available());

        assert!(serde_json::from_str::<AvailabilityResponse>(r#"{"message": "x"}"#).is_err());
    }

    #[test]
    fn test_request_tokens() {
        let tokens = RequestTokens::new();
        let first = tokens.issue();
        assert!(tokens.is_current(first));

        let second = tokens.issue();
        assert!(second > first);
        assert!(!tokens.is_current(first));
        assert!(tokens.is_current(second));
    }

    #[tokio::test]
    async fn test_empty_email_does_nothing() {
        let check = EmailCheck::new(ScriptedClient::default(), Messages::default());
        assert_eq!(check.on_blur("").await, None);
        assert!(check.client().requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_email_skips_network() {
        let check = EmailCheck::new(ScriptedClient::default(), Messages::default());
        let notice = check.on_blur("not-an-email").await.unwrap();

        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, Messages::default().email_format);
        assert!(check.client().requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_taken_email_uses_server_message() {
        let client = ScriptedClient::answering(Ok(taken(Some("taken"))));
        let check = EmailCheck::new(client, Messages::default());

        let notice = check.on_blur("user@example.com").await.unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert!(notice.message.contains("taken"));

        let requests = check.client().requests.borrow();
        assert_eq!(requests.as_slice(), &[AvailabilityRequest::new("user@example.com")]);
    }

    #[tokio::test]
    async fn test_taken_email_default_message() {
        let client = ScriptedClient::answering(Ok(taken(None)));
        let check = EmailCheck::new(client, Messages::default());

        let notice = check.on_blur("user@example.com").await.unwrap();
        assert_eq!(notice, Notice::error("El correo electrónico ya está en uso."));
    }

    #[tokio::test]
    async fn test_available_email_is_silent() {
        let client = ScriptedClient::answering(Ok(available()));
        let check = EmailCheck::new(client, Messages::default());
        assert_eq!(check.on_blur("user@example.com").await, None);
    }

    #[tokio::test]
    async fn test_transport_failures_become_info() {
        for err in [
            AvailabilityError::Network("offline".into()),
            AvailabilityError::Status(500),
            AvailabilityError::Decode("expected value".into()),
        ] {
            let check = EmailCheck::new(ScriptedClient::answering(Err(err)), Messages::default());
            let notice = check.on_blur("user@example.com").await.unwrap();
            assert_eq!(notice.severity, Severity::Info);
            assert_eq!(notice.message, Messages::default().email_check_failed);
        }
    }

    #[tokio::test]
    async fn test_superseded_response_is_dropped() {
        let client = ManualClient::default();
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        client.pending.borrow_mut().push_back(first_rx);
        client.pending.borrow_mut().push_back(second_rx);

        let check = EmailCheck::new(client, Messages::default());

        let respond = async move {
            tokio::task::yield_now().await;
            // Newer check completes first, the stale one after it
            second_tx.send(taken(Some("second"))).unwrap();
            tokio::task::yield_now().await;
            first_tx.send(taken(Some("first"))).unwrap();
        };

        let (first, second, ()) = tokio::join!(
            check.on_blur("first@example.com"),
            check.on_blur("second@example.com"),
            respond,
        );

        assert_eq!(first, None);
        assert_eq!(second, Some(Notice::error("second")));
    }

    #[tokio::test]
    async fn test_invalid_blur_supersedes_pending_check() {
        let client = ManualClient::default();
        let (tx, rx) = oneshot::channel();
        client.pending.borrow_mut().push_back(rx);

        let check = EmailCheck::new(client, Messages::default());

        let respond = async move {
            tokio::task::yield_now().await;
            tx.send(taken(Some("old@example.com taken"))).unwrap();
        };

        let (pending, malformed, cleared, ()) = tokio::join!(
            check.on_blur("old@example.com"),
            check.on_blur("bad"),
            check.on_blur(""),
            respond,
        );

        assert_eq!(pending, None);
        assert_eq!(malformed, Some(Notice::error(Messages::default().email_format)));
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_begin_issues_token_for_every_blur() {
        let check = EmailCheck::new(ScriptedClient::default(), Messages::default());

        let BlurOutcome::Lookup(token) = check.begin("user@example.com") else {
            panic!("a well-formed email needs a lookup");
        };
        assert_eq!(check.begin(""), BlurOutcome::Skip);
        assert!(!check.tokens.is_current(token));
    }
}
