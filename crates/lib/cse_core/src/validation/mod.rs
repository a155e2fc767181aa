//! Form validation.
//!
//! Forms declare their rules with `#[derive(Validate)]`, messages included,
//! and are checked after trimming. The first failing rule of a field supplies
//! its message. Errors are reported in the form's [`FormData::FIELDS`] order,
//! and a validated form comes back as [`Validated::Proceed`] or as
//! [`Validated::Redisplay`] with the error list and the (redacted) input to
//! echo back.

pub mod forms;
pub mod rules;

pub use forms::{
    AccountUpdateForm, ClassificationForm, InventoryForm, LoginForm, PasswordForm,
    RegistrationForm, VehicleUpdateForm, check_account_update, check_registration,
};

use serde::Serialize;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of validating a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validated<T> {
    /// Input is acceptable; hand it to the mutator.
    Proceed(T),
    /// Input is rejected; re-render the originating view.
    Redisplay {
        errors: Vec<FieldError>,
        echoed: T,
    },
}

/// A submitted form with declarative rules.
pub trait FormData: Validate + Sized {
    /// Field names in the order their errors are reported. Nested forms list
    /// their inner fields here too.
    const FIELDS: &'static [&'static str];

    /// Trim whitespace from every field that is not a secret.
    fn sanitize(&mut self);

    /// Clear fields that must never be echoed back (passwords).
    fn redact(&mut self) {}
}

/// Collects at most one error per field and orders them for display.
#[derive(Debug)]
pub struct Checker {
    order: &'static [&'static str],
    errors: Vec<FieldError>,
}

impl Checker {
    fn new(order: &'static [&'static str]) -> Self {
        Self {
            order,
            errors: Vec::new(),
        }
    }

    /// Take the first message of every failed field in `errors`, descending
    /// into nested forms.
    fn absorb(&mut self, errors: &ValidationErrors) {
        for (name, kind) in errors.errors() {
            match kind {
                ValidationErrorsKind::Field(failures) => {
                    let field = self.order.iter().copied().find(|f| *f == *name);
                    if let (Some(field), Some(first)) = (field, failures.first()) {
                        let message = first.message.as_ref().unwrap_or(&first.code);
                        self.error(field, message.to_string());
                    }
                }
                ValidationErrorsKind::Struct(inner) => self.absorb(inner),
                ValidationErrorsKind::List(items) => {
                    for inner in items.values() {
                        self.absorb(inner);
                    }
                }
            }
        }
    }

    /// Record an error found outside the derived rules. Ignored if `field`
    /// already failed.
    pub fn error(&mut self, field: &'static str, message: impl Into<String>) -> &mut Self {
        if !self.has_error(field) {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    /// Whether `field` already failed.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn position(&self, field: &str) -> usize {
        self.order
            .iter()
            .position(|f| *f == field)
            .unwrap_or(self.order.len())
    }

    /// Turn the collected errors into a verdict on `form`.
    pub fn finish<T: FormData>(mut self, mut form: T) -> Validated<T> {
        if self.errors.is_empty() {
            return Validated::Proceed(form);
        }
        let mut errors = std::mem::take(&mut self.errors);
        errors.sort_by_key(|e| self.position(e.field));
        form.redact();
        Validated::Redisplay {
            errors,
            echoed: form,
        }
    }
}

/// Sanitize `form` and run its rules. Returns the form alongside the checker
/// so callers can add checks that need I/O before finishing.
pub fn check<T: FormData>(mut form: T) -> (T, Checker) {
    form.sanitize();
    let mut checker = Checker::new(T::FIELDS);
    if let Err(errors) = form.validate() {
        checker.absorb(&errors);
    }
    (form, checker)
}

/// Sanitize and validate `form` with its declarative rules only.
pub fn validate<T: FormData>(form: T) -> Validated<T> {
    let (form, checker) = check(form);
    checker.finish(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Validate)]
    struct Signup {
        #[validate(
            length(min = 1, message = "Name is required."),
            custom(function = "rules::letters", message = "Letters only.")
        )]
        name: String,
        #[validate(length(min = 1, message = "Secret is required."))]
        secret: String,
    }

    impl FormData for Signup {
        const FIELDS: &'static [&'static str] = &["name", "secret"];

        fn sanitize(&mut self) {
            self.name = self.name.trim().to_string();
        }

        fn redact(&mut self) {
            self.secret.clear();
        }
    }

    #[test]
    fn one_message_per_failed_field() {
        let verdict = validate(Signup {
            name: "   ".into(),
            secret: String::new(),
        });
        let Validated::Redisplay { errors, .. } = verdict else {
            panic!("expected redisplay");
        };
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["Name is required.", "Secret is required."]);
    }

    #[test]
    fn redisplay_echoes_sanitized_input_without_secrets() {
        let verdict = validate(Signup {
            name: "  ab1 ".into(),
            secret: "hunter2".into(),
        });
        let Validated::Redisplay { echoed, errors } = verdict else {
            panic!("expected redisplay");
        };
        assert_eq!(errors, vec![FieldError::new("name", "Letters only.")]);
        assert_eq!(echoed.name, "ab1");
        assert!(echoed.secret.is_empty());
    }

    #[test]
    fn extra_errors_take_their_field_position() {
        let (form, mut checker) = check(Signup {
            name: "Bob".into(),
            secret: String::new(),
        });
        checker.error("name", "Name is taken.");
        checker.error("name", "Ignored second error.");
        let Validated::Redisplay { errors, .. } = checker.finish(form) else {
            panic!("expected redisplay");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "secret"]);
        assert_eq!(errors[0].message, "Name is taken.");
    }

    #[test]
    fn valid_input_proceeds_untouched() {
        let verdict = validate(Signup {
            name: " Bob ".into(),
            secret: "hunter2".into(),
        });
        assert_eq!(
            verdict,
            Validated::Proceed(Signup {
                name: "Bob".into(),
                secret: "hunter2".into(),
            })
        );
    }
}
