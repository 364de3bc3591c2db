//! Submit gate
//!
//! Ordered checks run when the registration form is submitted. The first
//! failing check wins; when every check passes the submission goes through
//! untouched.

use crate::config::{GuardConfig, Messages};
use crate::form::{field_label, FieldRef, FormView};
use crate::sanitize::digit_count;
use crate::toast::Notice;

/// Which check blocked the submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A required field was blank
    Required(String),
    DocumentType,
    PhoneLength,
    SupportType,
    Terms,
}

/// A blocked submission: what failed, what to tell the user, where to move focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
    pub focus: Option<FieldRef>,
}

impl Violation {
    pub fn notice(&self) -> Notice {
        Notice::error(self.message.clone())
    }
}

/// The submit-time rule set of the registration form
#[derive(Debug, Clone)]
pub struct SubmitGate {
    required_fields: Vec<String>,
    document_type: FieldRef,
    phone: FieldRef,
    phone_digits: usize,
    support_type_group: String,
    terms: FieldRef,
    messages: Messages,
}

impl SubmitGate {
    pub fn from_config(config: &GuardConfig) -> Self {
        let selectors = &config.selectors;
        Self {
            required_fields: config.required_fields.clone(),
            document_type: FieldRef::name(&selectors.document_type_name),
            phone: FieldRef::id(&selectors.phone_id),
            phone_digits: config.phone_digits,
            support_type_group: selectors.support_type_name.clone(),
            terms: FieldRef::id(&selectors.terms_id),
            messages: config.messages.clone(),
        }
    }

    /// Runs every check in order, stopping at the first violation
    pub fn evaluate<F: FormView + ?Sized>(&self, form: &F) -> Result<(), Violation> {
        self.check_required(form)?;
        self.check_document_type(form)?;
        self.check_phone(form)?;
        self.check_support_type(form)?;
        self.check_terms(form)?;
        Ok(())
    }

    fn check_required<F: FormView + ?Sized>(&self, form: &F) -> Result<(), Violation> {
        for name in &self.required_fields {
            let field = FieldRef::name(name);
            // Absent fields are not this page's concern
            let Some(value) = form.value(&field) else {
                continue;
            };

            if value.trim().is_empty() {
                let label = field_label(form, &field);
                return Err(Violation {
                    rule: Rule::Required(name.clone()),
                    message: self.messages.required_field_for(&label),
                    focus: Some(field),
                });
            }
        }
        Ok(())
    }

    fn check_document_type<F: FormView + ?Sized>(&self, form: &F) -> Result<(), Violation> {
        match form.value(&self.document_type) {
            Some(value) if value.is_empty() => Err(Violation {
                rule: Rule::DocumentType,
                message: self.messages.document_type.clone(),
                focus: Some(self.document_type.clone()),
            }),
            _ => Ok(()),
        }
    }

    fn check_phone<F: FormView + ?Sized>(&self, form: &F) -> Result<(), Violation> {
        match form.value(&self.phone) {
            Some(value) if digit_count(&value) != self.phone_digits => Err(Violation {
                rule: Rule::PhoneLength,
                message: self.messages.phone_length_for(self.phone_digits),
                focus: Some(self.phone.clone()),
            }),
            _ => Ok(()),
        }
    }

    fn check_support_type<F: FormView + ?Sized>(&self, form: &F) -> Result<(), Violation> {
        if form.any_checked(&self.support_type_group) {
            Ok(())
        } else {
            Err(Violation {
                rule: Rule::SupportType,
                message: self.messages.support_type.clone(),
                focus: None,
            })
        }
    }

    fn check_terms<F: FormView + ?Sized>(&self, form: &F) -> Result<(), Violation> {
        match form.is_checked(&self.terms) {
            Some(false) => Err(Violation {
                rule: Rule::Terms,
                message: self.messages.terms.clone(),
                focus: None,
            }),
            _ => Ok(()),
        }
    }
}
