//! Submit handler

use std::cell::Cell;
use std::rc::Rc;

use form_guard_core::{PageEvent, PageState, SubmitGate};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom::{DomError, DomForm};
use crate::notify::NotificationCenter;

/// Runs the submit gate on every submission.
///
/// A violation cancels the event, raises a toast and focuses the offending
/// field. A clean form is left alone so the browser submits it natively.
pub fn bind_submit_gate(
    form: DomForm,
    gate: SubmitGate,
    center: Rc<NotificationCenter>,
    state: Rc<Cell<PageState>>,
) -> Result<(), DomError> {
    let target = form.element().clone();
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        transition(&state, PageEvent::SubmitRequested);

        match gate.evaluate(&form) {
            Ok(()) => transition(&state, PageEvent::GatePassed),
            Err(violation) => {
                event.prevent_default();
                transition(&state, PageEvent::GateBlocked);
                tracing::debug!(rule = ?violation.rule, "submission blocked");

                center.show(&violation.notice());
                if let Some(field) = &violation.focus {
                    form.focus(field);
                }
            }
        }
    }) as Box<dyn FnMut(_)>);

    target.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget(); // Lives as long as the page

    Ok(())
}

/// Applies a page event, logging rejected transitions
pub(crate) fn transition(state: &Cell<PageState>, event: PageEvent) {
    match state.get().next(event) {
        Ok(next) => state.set(next),
        Err(err) => tracing::warn!("{}", err),
    }
}
