//! FormGuard WASM
//!
//! Browser wiring for the entrepreneur registration form: toasts, digit-only
//! fields, blur validation of email and password, the submit gate, server
//! flash messages and the password visibility toggle. All rules come from
//! `form-guard-core`; this crate only attaches them to the page.

use std::cell::Cell;
use std::rc::Rc;

use form_guard_core::{EmailCheck, GuardConfig, PageEvent, PageState, SubmitGate};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

pub mod dom;
pub mod fetch;
pub mod flash;
pub mod gate;
pub mod logging;
pub mod notify;
pub mod sanitize;
pub mod toggle;
pub mod validators;

use dom::{input_by_id, DomError, DomForm};
use fetch::FetchAvailabilityClient;
use notify::NotificationCenter;

/// Set on `window` to skip the automatic mount and call `mountFormGuard` instead
pub const MANUAL_MOUNT_FLAG: &str = "FORM_GUARD_MANUAL_MOUNT";

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Handles kept after mounting
pub struct FormGuard {
    pub center: Rc<NotificationCenter>,
    pub state: Rc<Cell<PageState>>,
}

impl FormGuard {
    /// Attaches every behavior to the page.
    ///
    /// The password toggle is always published. Everything else needs the
    /// registration form; without it nothing more is attached and `None` is
    /// returned.
    pub fn mount(document: &Document, config: &GuardConfig) -> Result<Option<Self>, DomError> {
        let selectors = &config.selectors;
        let window = dom::window()?;

        toggle::install_password_toggle(
            &window,
            document.clone(),
            selectors.password_id.clone(),
            selectors.eye_icon_id.clone(),
        )?;

        let Some(form) = DomForm::find(document, &selectors.form_id) else {
            tracing::debug!("no #{} in page, FormGuard idle", selectors.form_id);
            return Ok(None);
        };

        let center = Rc::new(NotificationCenter::new(document.clone(), config.timings));
        let state = Rc::new(Cell::new(PageState::Loaded));

        sanitize::bind_numeric_inputs(document, &selectors.numeric_fields)?;

        if let Some(email) = input_by_id(document, &selectors.email_id) {
            let client = FetchAvailabilityClient::new(config.endpoint.clone());
            tracing::debug!(endpoint = client.endpoint(), "email availability checks enabled");
            let check = Rc::new(EmailCheck::new(client, config.messages.clone()));
            validators::bind_email_validator(&email, check, center.clone(), state.clone())?;
        }

        if let Some(password) = input_by_id(document, &selectors.password_id) {
            validators::bind_password_validator(
                &password,
                config.messages.password_weak.clone(),
                center.clone(),
                state.clone(),
            )?;
        }

        bind_interaction(&form, state.clone())?;
        gate::bind_submit_gate(
            form,
            SubmitGate::from_config(config),
            center.clone(),
            state.clone(),
        )?;

        flash::relay_flash_messages(document, &selectors.flash_container_id, &center);
        gate::transition(&state, PageEvent::FlashRelayed);

        tracing::info!("FormGuard mounted on #{}", selectors.form_id);
        Ok(Some(Self { center, state }))
    }
}

/// Any edit after a blocked submission puts the page back to interactive
fn bind_interaction(form: &DomForm, state: Rc<Cell<PageState>>) -> Result<(), DomError> {
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if state.get() == PageState::Blocked {
            gate::transition(&state, PageEvent::Interaction);
        }
    }) as Box<dyn FnMut(_)>);

    form.element()
        .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget(); // Lives as long as the page

    Ok(())
}

/// Mounts once per page; repeated calls are rejected
fn mount_once(config: &GuardConfig) -> Result<(), DomError> {
    if MOUNTED.with(|mounted| mounted.replace(true)) {
        return Err(DomError::Js("FormGuard is already mounted".to_string()));
    }

    let document = dom::document()?;
    FormGuard::mount(&document, config)?;
    Ok(())
}

/// Set panic hook and logging, then mount once the DOM is parsed
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let window = dom::window()?;
    let manual = js_sys::Reflect::get(&window, &JsValue::from_str(MANUAL_MOUNT_FLAG))
        .map(|flag| flag.is_truthy())
        .unwrap_or(false);
    if manual {
        // mountFormGuard sets up logging with the caller's level
        return Ok(());
    }

    let config = GuardConfig::default();
    if let Ok(level) = config.max_log_level() {
        logging::init(level);
    }

    let document = dom::document()?;
    if document.ready_state() != "loading" {
        return mount_once(&config).map_err(JsValue::from);
    }

    let on_ready = Closure::once_into_js(move || {
        if let Err(err) = mount_once(&config) {
            tracing::error!("FormGuard mount failed: {}", err);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;

    Ok(())
}

/// Mount with an explicit configuration
///
/// Accepts a config object, a TOML string, or nothing for the defaults.
///
/// # Example (JavaScript)
/// ```javascript
/// window.FORM_GUARD_MANUAL_MOUNT = true;
/// await init();
/// mountFormGuard({ endpoint: '/api/check-email', timings: { hide_after_ms: 3000 } });
/// ```
#[wasm_bindgen(js_name = mountFormGuard)]
pub fn mount_form_guard(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;

    if let Ok(level) = config.max_log_level() {
        logging::init(level);
    }

    mount_once(&config).map_err(JsValue::from)
}

fn parse_config(config: JsValue) -> Result<GuardConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(GuardConfig::default());
    }

    if let Some(toml) = config.as_string() {
        return GuardConfig::from_toml_str(&toml)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {:#}", e)));
    }

    let config: GuardConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {:#}", e)))?;
    Ok(config)
}
