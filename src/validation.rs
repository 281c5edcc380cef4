//! Declarative field rules evaluated against a [`Submission`].
//!
//! Each mutating operation owns a static rule table. [`validate`] runs every rule in table
//! order and reports all failures at once, so a form can be re-displayed with the full list.
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

use crate::domain::{Field, Submission};

#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// At least this many grapheme clusters.
    MinLength(usize),
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A missing field is checked as an empty string.
    Required,
    /// The rule is skipped when the field was not submitted.
    IfPresent,
}

#[derive(Debug)]
pub struct FieldRule {
    pub field: Field,
    pub check: Check,
    pub presence: Presence,
    pub message: &'static str,
}

pub const NAME_TOO_SHORT: &str = "El nombre es demasiado corto";
pub const INVALID_EMAIL: &str = "El correo electrónico no es válido";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";

pub static CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        check: Check::MinLength(3),
        presence: Presence::Required,
        message: NAME_TOO_SHORT,
    },
    FieldRule {
        field: Field::Email,
        check: Check::Email,
        presence: Presence::Required,
        message: INVALID_EMAIL,
    },
    FieldRule {
        field: Field::Password,
        check: Check::MinLength(6),
        presence: Presence::Required,
        message: PASSWORD_TOO_SHORT,
    },
];

// Name and email are not re-checked on update.
pub static UPDATE_RULES: &[FieldRule] = &[FieldRule {
    field: Field::Password,
    check: Check::MinLength(6),
    presence: Presence::IfPresent,
    message: PASSWORD_TOO_SHORT,
}];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// Every rule that failed for one submission. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.message).collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl Check {
    fn passes(&self, value: &str) -> bool {
        match self {
            Check::MinLength(min) => value.graphemes(true).count() >= *min,
            Check::Email => value.validate_email(),
        }
    }
}

pub fn validate(rules: &[FieldRule], submission: &impl Submission) -> Result<(), ValidationErrors> {
    let failures: Vec<FieldError> = rules
        .iter()
        .filter(|rule| {
            match (submission.value(rule.field), rule.presence) {
                (Some(value), _) => !rule.check.passes(value),
                (None, Presence::Required) => !rule.check.passes(""),
                (None, Presence::IfPresent) => false,
            }
        })
        .map(|rule| FieldError {
            field: rule.field,
            message: rule.message,
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(failures))
    }
}
