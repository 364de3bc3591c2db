//! NotificationCenter: renders toasts into the page

use std::cell::Cell;
use std::rc::Rc;

use form_guard_core::toast::TOAST_CLASS;
use form_guard_core::{Notice, Severity, ToastEvent, ToastPhase, ToastTimings, NOTIFICATION_STYLES, SHOW_CLASS};
use gloo_timers::callback::Timeout;
use once_cell::unsync::OnceCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event};

use crate::dom::DomError;

/// Marks the stylesheet this crate inserts
pub const STYLE_MARKER_ATTR: &str = "data-form-guard";

/// Creates, shows, hides and removes toasts.
///
/// One center per page; its stylesheet guard makes the presentation rules
/// land in `<head>` at most once no matter how many toasts are raised.
pub struct NotificationCenter {
    document: Document,
    timings: ToastTimings,
    styles: OnceCell<Element>,
}

impl NotificationCenter {
    pub fn new(document: Document, timings: ToastTimings) -> Self {
        Self {
            document,
            timings,
            styles: OnceCell::new(),
        }
    }

    /// Shows `message` as a toast. Failures are logged, never raised.
    pub fn notify(&self, message: &str, severity: Severity) {
        if let Err(err) = self.try_notify(message, severity) {
            tracing::error!("Could not show notification {:?}: {}", message, err);
        }
    }

    pub fn show(&self, notice: &Notice) {
        self.notify(&notice.message, notice.severity);
    }

    /// Shows a toast and hands back its element
    pub fn try_notify(&self, message: &str, severity: Severity) -> Result<Element, DomError> {
        self.ensure_styles()?;

        let body = self.document.body().ok_or(DomError::Missing("body"))?;
        let toast = self.document.create_element("div")?;
        toast.set_text_content(Some(message));
        toast.set_class_name(&severity.toast_class_name());
        body.append_child(&toast)?;

        tracing::debug!(?severity, "toast created");
        schedule_lifecycle(toast.clone(), self.timings);
        Ok(toast)
    }

    fn ensure_styles(&self) -> Result<(), DomError> {
        self.styles.get_or_try_init(|| self.inject_styles())?;
        Ok(())
    }

    fn inject_styles(&self) -> Result<Element, DomError> {
        let head = self.document.head().ok_or(DomError::Missing("head"))?;
        let style = self.document.create_element("style")?;
        style.set_attribute(STYLE_MARKER_ATTR, "")?;
        style.set_text_content(Some(NOTIFICATION_STYLES));
        head.append_child(&style)?;
        Ok(style)
    }
}

/// Wires the show timer, the hide timer and the one-shot removal listener.
///
/// Removal waits for the exit transition's `transitionend`, so the toast
/// never disappears before it has faded out.
fn schedule_lifecycle(toast: Element, timings: ToastTimings) {
    let phase = Rc::new(Cell::new(ToastPhase::Created));

    {
        let toast = toast.clone();
        let phase = phase.clone();
        Timeout::new(timings.show_delay_ms, move || {
            if let Err(err) = toast.class_list().add_1(SHOW_CLASS) {
                tracing::warn!("Could not show toast: {:?}", err);
            }
            advance(&phase, ToastEvent::ShowDelayElapsed);
        })
        .forget();
    }

    Timeout::new(timings.hide_after_ms, move || {
        if let Err(err) = toast.class_list().remove_1(SHOW_CLASS) {
            tracing::warn!("Could not hide toast: {:?}", err);
        }
        advance(&phase, ToastEvent::HideDelayElapsed);

        let removed = toast.clone();
        let on_end = Closure::once_into_js(move |_event: Event| {
            if !advance(&phase, ToastEvent::TransitionEnded).is_attached() {
                removed.remove();
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(err) = toast.add_event_listener_with_callback_and_add_event_listener_options(
            "transitionend",
            on_end.unchecked_ref(),
            &options,
        ) {
            tracing::error!("Could not schedule toast removal: {:?}", err);
            toast.remove();
        }
    })
    .forget();
}

fn advance(phase: &Cell<ToastPhase>, event: ToastEvent) -> ToastPhase {
    match phase.get().advance(event) {
        Ok(next) => phase.set(next),
        Err(err) => tracing::debug!("{}", err),
    }
    phase.get()
}

/// Number of toasts currently in the page
pub fn toast_count(document: &Document) -> u32 {
    document
        .get_elements_by_class_name(TOAST_CLASS)
        .length()
}
