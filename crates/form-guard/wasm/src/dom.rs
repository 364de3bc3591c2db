//! DOM access helpers and the live-form `FormView`

use form_guard_core::{FieldRef, FormView};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Window,
};

/// Failure talking to the page
#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("document has no {0}")]
    Missing(&'static str),

    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

/// Looks up an `<input>` by id
pub fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
}

/// Value of an input, select or textarea; `None` for anything else
fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Some(select.value());
    }
    if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(textarea.value());
    }
    None
}

fn control_placeholder(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.placeholder());
    }
    if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(textarea.placeholder());
    }
    None
}

/// The registration form as it currently stands in the page.
///
/// Names resolve inside the form; ids resolve page-wide.
#[derive(Debug, Clone)]
pub struct DomForm {
    document: Document,
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(document: Document, form: HtmlFormElement) -> Self {
        Self { document, form }
    }

    /// Finds the form by id, `None` when the page has no such form
    pub fn find(document: &Document, form_id: &str) -> Option<Self> {
        document
            .get_element_by_id(form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            .map(|form| Self::new(document.clone(), form))
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn lookup(&self, field: &FieldRef) -> Option<Element> {
        match field {
            FieldRef::Name(name) => self
                .form
                .query_selector(&format!("[name=\"{}\"]", name))
                .ok()
                .flatten(),
            FieldRef::Id(id) => self.document.get_element_by_id(id),
        }
    }

    /// Moves keyboard focus to a control, if it exists
    pub fn focus(&self, field: &FieldRef) {
        let Some(element) = self
            .lookup(field)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };

        if let Err(err) = element.focus() {
            tracing::warn!("Could not focus {}: {:?}", field.key(), err);
        }
    }
}

impl FormView for DomForm {
    fn value(&self, field: &FieldRef) -> Option<String> {
        self.lookup(field).and_then(|el| control_value(&el))
    }

    fn placeholder(&self, field: &FieldRef) -> Option<String> {
        self.lookup(field).and_then(|el| control_placeholder(&el))
    }

    fn any_checked(&self, group: &str) -> bool {
        self.form
            .query_selector(&format!("input[name=\"{}\"]:checked", group))
            .ok()
            .flatten()
            .is_some()
    }

    fn is_checked(&self, field: &FieldRef) -> Option<bool> {
        self.lookup(field)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.checked())
    }
}
