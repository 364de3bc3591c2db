//! Digit-only input restriction

use form_guard_core::digits_only;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::dom::DomError;

/// Binds the digit filter to every input matching one of `selectors`.
///
/// Returns how many inputs were bound; selectors matching nothing are skipped.
pub fn bind_numeric_inputs(document: &Document, selectors: &[String]) -> Result<usize, DomError> {
    let mut bound = 0;

    for selector in selectors {
        let input = match document.query_selector(selector) {
            Ok(Some(el)) => match el.dyn_into::<HtmlInputElement>() {
                Ok(input) => input,
                Err(_) => {
                    tracing::warn!("{} is not an <input>, skipping", selector);
                    continue;
                }
            },
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!("Invalid numeric field selector {}: {:?}", selector, err);
                continue;
            }
        };

        bind_numeric_input(&input)?;
        bound += 1;
    }

    Ok(bound)
}

/// Strips non-digits from `input` on every `input` event
pub fn bind_numeric_input(input: &HtmlInputElement) -> Result<(), DomError> {
    let target = input.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let value = target.value();
        let cleaned = digits_only(&value);
        if cleaned != value {
            target.set_value(&cleaned);
        }
    }) as Box<dyn FnMut(_)>);

    input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget(); // Lives as long as the page

    Ok(())
}
