//! Error types for `meetme-core`.
//!
//! Validation failures are field-scoped and always recoverable by further
//! edits. Engine errors signal a caller addressing a field or option the
//! schema does not declare, which a schema-driven renderer never does.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::SurveySchema;

pub(crate) const CHOOSE_ONE: &str = "Seleziona un'opzione";

/// Why a single field failed validation on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field has no value.
    #[error("required field has no value")]
    MissingRequired,

    /// A multi-select holds fewer or more entries than its bound allows.
    #[error("expected {} selections, got {actual}", describe_bound(.min, .max))]
    CardinalityViolation {
        min: usize,
        max: Option<usize>,
        actual: usize,
    },

    /// The value is present but malformed.
    #[error("invalid format: {problem}")]
    FormatInvalid { problem: FormatProblem },

    /// The privacy consent box was left unchecked.
    #[error("consent not given")]
    ConsentNotGiven,
}

impl FieldErrorKind {
    /// Message shown next to the offending input, in the landing page's
    /// language.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingRequired => "Campo obbligatorio".to_owned(),
            Self::CardinalityViolation { min, max, .. } => match max {
                Some(max) if max == min => format!("Seleziona esattamente {max} opzioni"),
                Some(max) if *min == 0 => format!("Massimo {max} opzioni"),
                Some(max) => format!("Seleziona da {min} a {max} opzioni"),
                None => format!("Seleziona almeno {min} opzioni"),
            },
            Self::FormatInvalid { problem } => problem.user_message(),
            Self::ConsentNotGiven => "Devi accettare l'informativa privacy".to_owned(),
        }
    }
}

/// The specific format check a value failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormatProblem {
    /// A choice value outside the declared option set.
    #[error("'{value}' is not an offered option")]
    NotAnOption { value: String },

    /// Text longer than the field's cap.
    #[error("{actual} characters exceeds the limit of {max_chars}")]
    TooLong { max_chars: usize, actual: usize },

    /// Text that does not look like an email address.
    #[error("not a valid email address")]
    Email,

    /// Text that is not an ISO `YYYY-MM-DD` date.
    #[error("'{value}' is not a YYYY-MM-DD date")]
    Date { value: String },

    /// A rating outside its scale.
    #[error("{actual} is outside the scale {min}..={max}")]
    OutOfScale { min: u8, max: u8, actual: u8 },

    /// The stored answer has a different shape than the field expects.
    #[error("expected a {expected} answer")]
    WrongShape { expected: &'static str },
}

impl FormatProblem {
    fn user_message(&self) -> String {
        match self {
            Self::NotAnOption { .. } | Self::WrongShape { .. } => CHOOSE_ONE.to_owned(),
            Self::TooLong { max_chars, .. } => format!("Massimo {max_chars} caratteri"),
            Self::Email => "Email non valida".to_owned(),
            Self::Date { .. } => "Data non valida".to_owned(),
            Self::OutOfScale { min, max, .. } => format!("Scegli un valore da {min} a {max}"),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::ref_option)]
fn describe_bound(min: &usize, max: &Option<usize>) -> String {
    match max {
        Some(max) if max == min => format!("exactly {max}"),
        Some(max) => format!("{min} to {max}"),
        None => format!("at least {min}"),
    }
}

/// Field-level failures collected by one submit attempt, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} field(s) failed validation: {}", .errors.len(), field_list(.errors))]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, FieldErrorKind>,
}

fn field_list(errors: &BTreeMap<&'static str, FieldErrorKind>) -> String {
    errors.keys().copied().collect::<Vec<_>>().join(", ")
}

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.errors.insert(field, kind);
    }

    /// The failure recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldErrorKind> {
        self.errors.get(field)
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over `(field, kind)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldErrorKind)> {
        self.errors.iter().map(|(field, kind)| (*field, kind))
    }

    /// Names of the failing fields.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    /// `(field, message)` pairs worded for the page, using each field's own
    /// copy from `schema` where it has one.
    pub fn messages<'a>(
        &'a self,
        schema: &'a SurveySchema,
    ) -> impl Iterator<Item = (&'static str, String)> + 'a {
        self.iter().map(|(field, kind)| {
            let message = schema
                .field(field)
                .map_or_else(|| kind.user_message(), |spec| spec.user_message(kind));
            (field, message)
        })
    }
}

/// Errors from addressing the engine outside its schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The schema has no field with this name.
    #[error("unknown field '{name}'")]
    UnknownField { name: String },

    /// The value's shape does not match the field kind, or the field can
    /// only be changed through a different operation.
    #[error("field '{field}' is a {kind} field and cannot take a {given} value")]
    KindMismatch {
        field: &'static str,
        kind: &'static str,
        given: &'static str,
    },

    /// The multi-select has no option with this id.
    #[error("field '{field}' has no option '{option}'")]
    UnknownOption { field: &'static str, option: String },
}

/// Errors from a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// One or more visible fields failed validation; the phase is unchanged.
    #[error("submission rejected: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The questionnaire was already submitted.
    #[error("questionnaire already submitted")]
    AlreadySubmitted,
}

/// Errors from a submit sink. These never flow back into the engine state.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The record could not be serialized for delivery.
    #[error("sink '{sink}' failed to serialize record: {reason}")]
    Serialization { sink: String, reason: String },

    /// The sink could not hand the record over.
    #[error("sink '{sink}' failed to deliver record: {reason}")]
    Delivery { sink: String, reason: String },
}

/// Inconsistencies found by [`SurveySchema::check`](crate::schema::SurveySchema::check).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two fields share a name.
    #[error("duplicate field '{name}'")]
    DuplicateField { name: &'static str },

    /// A field points at a section the schema does not declare.
    #[error("field '{field}' belongs to unknown section '{section}'")]
    UnknownSection {
        field: &'static str,
        section: &'static str,
    },

    /// A choice or multi-select declares no options.
    #[error("field '{field}' declares no options")]
    NoOptions { field: &'static str },

    /// A visibility predicate references a missing field.
    #[error("field '{field}' is governed by unknown field '{trigger}'")]
    UnknownTrigger {
        field: &'static str,
        trigger: &'static str,
    },

    /// A visibility predicate references a field of the wrong kind, or an
    /// option the governing field does not offer.
    #[error("field '{field}' has an invalid trigger on '{trigger}': {reason}")]
    InvalidTrigger {
        field: &'static str,
        trigger: &'static str,
        reason: String,
    },

    /// A scale whose default lies outside its range.
    #[error("scale '{field}' has default {default} outside {min}..={max}")]
    ScaleDefault {
        field: &'static str,
        min: u8,
        max: u8,
        default: u8,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_messages_follow_bound_shape() {
        let exact = FieldErrorKind::CardinalityViolation {
            min: 3,
            max: Some(3),
            actual: 2,
        };
        assert_eq!(exact.to_string(), "expected exactly 3 selections, got 2");
        assert_eq!(exact.user_message(), "Seleziona esattamente 3 opzioni");

        let at_most = FieldErrorKind::CardinalityViolation {
            min: 0,
            max: Some(2),
            actual: 3,
        };
        assert_eq!(at_most.user_message(), "Massimo 2 opzioni");

        let at_least = FieldErrorKind::CardinalityViolation {
            min: 1,
            max: None,
            actual: 0,
        };
        assert_eq!(at_least.to_string(), "expected at least 1 selections, got 0");
    }

    #[test]
    fn validation_errors_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.insert("email", FieldErrorKind::FormatInvalid {
            problem: FormatProblem::Email,
        });
        errors.insert("budget", FieldErrorKind::MissingRequired);
        assert_eq!(
            errors.to_string(),
            "2 field(s) failed validation: budget, email"
        );
        assert_eq!(
            errors.get("email").map(FieldErrorKind::user_message).as_deref(),
            Some("Email non valida")
        );
    }

    #[test]
    fn field_error_serializes_with_kind_tag() {
        let json = serde_json::to_value(FieldErrorKind::ConsentNotGiven).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "consent_not_given" }));
    }
}
