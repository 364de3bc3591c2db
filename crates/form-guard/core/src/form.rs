//! Read-only view of the registration form

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How a control is located: by its `name` inside the form, or by page-wide `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRef {
    Name(String),
    Id(String),
}

impl FieldRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// The raw `name` or `id`
    pub fn key(&self) -> &str {
        match self {
            Self::Name(key) | Self::Id(key) => key,
        }
    }
}

/// What the submit gate needs to know about the form.
///
/// `None` always means "no such control", which lets checks skip absent
/// optional fields.
pub trait FormView {
    /// Current value of a text-like control (input, textarea, select)
    fn value(&self, field: &FieldRef) -> Option<String>;

    /// Placeholder text of a control, if it has one
    fn placeholder(&self, field: &FieldRef) -> Option<String>;

    /// Whether any radio of the named group is checked
    fn any_checked(&self, group: &str) -> bool;

    /// Checked state of a checkbox
    fn is_checked(&self, field: &FieldRef) -> Option<bool>;
}

/// Turns a field name into display text: `numero_celular` -> `numero celular`
pub fn humanize_field_name(name: &str) -> String {
    name.replace('_', " ")
}

/// Label used in messages about a field: its placeholder, else its humanized name
pub fn field_label<F: FormView + ?Sized>(form: &F, field: &FieldRef) -> String {
    form.placeholder(field)
        .filter(|placeholder| !placeholder.is_empty())
        .unwrap_or_else(|| humanize_field_name(field.key()))
}

/// In-memory form, used to evaluate rules without a browser
#[derive(Debug, Clone, Default)]
pub struct MapForm {
    values: HashMap<FieldRef, String>,
    placeholders: HashMap<FieldRef, String>,
    checked_groups: HashSet<String>,
    checkboxes: HashMap<FieldRef, bool>,
}

impl MapForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, field: FieldRef, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn with_placeholder(mut self, field: FieldRef, placeholder: impl Into<String>) -> Self {
        self.placeholders.insert(field, placeholder.into());
        self
    }

    pub fn with_checked_group(mut self, group: impl Into<String>) -> Self {
        self.checked_groups.insert(group.into());
        self
    }

    pub fn with_checkbox(mut self, field: FieldRef, checked: bool) -> Self {
        self.checkboxes.insert(field, checked);
        self
    }

    pub fn set_value(&mut self, field: FieldRef, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn remove(&mut self, field: &FieldRef) {
        self.values.remove(field);
        self.placeholders.remove(field);
        self.checkboxes.remove(field);
    }

    pub fn uncheck_group(&mut self, group: &str) {
        self.checked_groups.remove(group);
    }

    pub fn set_checkbox(&mut self, field: FieldRef, checked: bool) {
        self.checkboxes.insert(field, checked);
    }
}

impl FormView for MapForm {
    fn value(&self, field: &FieldRef) -> Option<String> {
        self.values.get(field).cloned()
    }

    fn placeholder(&self, field: &FieldRef) -> Option<String> {
        self.placeholders.get(field).cloned()
    }

    fn any_checked(&self, group: &str) -> bool {
        self.checked_groups.contains(group)
    }

    fn is_checked(&self, field: &FieldRef) -> Option<bool> {
        self.checkboxes.get(field).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_field_name() {
        assert_eq!(humanize_field_name("numero_celular"), "numero celular");
        assert_eq!(humanize_field_name("titulo_proyecto_largo"), "titulo proyecto largo");
        assert_eq!(humanize_field_name("correo"), "correo");
    }

    #[test]
    fn test_field_label_prefers_placeholder() {
        let field = FieldRef::name("nombre_completo");
        let form = MapForm::new().with_placeholder(field.clone(), "Nombre completo");
        assert_eq!(field_label(&form, &field), "Nombre completo");
    }

    #[test]
    fn test_field_label_falls_back_on_empty_placeholder() {
        let field = FieldRef::name("relacion_sector");
        let form = MapForm::new().with_placeholder(field.clone(), "");
        assert_eq!(field_label(&form, &field), "relacion sector");

        let bare = MapForm::new();
        assert_eq!(field_label(&bare, &field), "relacion sector");
    }

    #[test]
    fn test_field_ref_key() {
        assert_eq!(FieldRef::id("celular-emprendedor").key(), "celular-emprendedor");
        assert_eq!(FieldRef::name("correo").key(), "correo");
    }
}
