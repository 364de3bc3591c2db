//! Password visibility toggle, callable from inline `onclick` markup

use form_guard_core::PasswordVisibility;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::dom::{input_by_id, DomError};

/// Global the page's eye icon calls: `onclick="togglePassword()"`
pub const TOGGLE_GLOBAL: &str = "togglePassword";

/// Flips the password input between hidden and visible and swaps the icon.
///
/// Returns the new visibility, or `None` when the input is not in the page.
pub fn toggle_password(
    document: &Document,
    password_id: &str,
    eye_icon_id: &str,
) -> Result<Option<PasswordVisibility>, DomError> {
    let Some(input) = input_by_id(document, password_id) else {
        return Ok(None);
    };

    let next = PasswordVisibility::from_input_type(&input.type_()).toggled();
    input.set_type(next.input_type());

    if let Some(icon) = document.get_element_by_id(eye_icon_id) {
        let (show, hide) = next.icon_classes();
        let classes = icon.class_list();
        classes.remove_1(hide)?;
        classes.add_1(show)?;
    }

    Ok(Some(next))
}

/// Publishes `window.togglePassword`
pub fn install_password_toggle(
    window: &Window,
    document: Document,
    password_id: String,
    eye_icon_id: String,
) -> Result<(), DomError> {
    let closure = Closure::wrap(Box::new(move || {
        if let Err(err) = toggle_password(&document, &password_id, &eye_icon_id) {
            tracing::error!("Could not toggle password visibility: {}", err);
        }
    }) as Box<dyn FnMut()>);

    js_sys::Reflect::set(window, &JsValue::from_str(TOGGLE_GLOBAL), closure.as_ref())?;
    closure.forget(); // Owned by the global from now on

    Ok(())
}
