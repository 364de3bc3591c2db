//! Blur-time field validators

use std::cell::Cell;
use std::rc::Rc;

use form_guard_core::{password_notice, AvailabilityClient, BlurOutcome, EmailCheck, PageState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::dom::DomError;
use crate::notify::NotificationCenter;

/// Checks the email on blur: format locally, then availability remotely.
///
/// A format error is shown before the listener returns. Only the
/// availability request runs in the background.
pub fn bind_email_validator<C>(
    input: &HtmlInputElement,
    check: Rc<EmailCheck<C>>,
    center: Rc<NotificationCenter>,
    state: Rc<Cell<PageState>>,
) -> Result<(), DomError>
where
    C: AvailabilityClient + 'static,
{
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if !state.get().accepts_input() {
            return;
        }

        let email = target.value();
        match check.begin(&email) {
            BlurOutcome::Skip => {}
            BlurOutcome::Invalid(notice) => center.show(&notice),
            BlurOutcome::Lookup(token) => {
                let check = check.clone();
                let center = center.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Some(notice) = check.lookup(&email, token).await {
                        center.show(&notice);
                    }
                });
            }
        }
    }) as Box<dyn FnMut(_)>);

    input.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
    closure.forget(); // Lives as long as the page

    Ok(())
}

/// Checks password strength on blur
pub fn bind_password_validator(
    input: &HtmlInputElement,
    message: String,
    center: Rc<NotificationCenter>,
    state: Rc<Cell<PageState>>,
) -> Result<(), DomError> {
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if !state.get().accepts_input() {
            return;
        }
        if let Some(notice) = password_notice(&target.value(), &message) {
            center.show(&notice);
        }
    }) as Box<dyn FnMut(_)>);

    input.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
    closure.forget(); // Lives as long as the page

    Ok(())
}
