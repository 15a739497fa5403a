//! Per-field and whole-record validation.
//!
//! Only active fields are checked: a conditional field whose predicate does
//! not hold keeps its value but is inert here.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::answer::{Answer, FieldValues};
use crate::derive;
use crate::error::{FieldErrorKind, FormatProblem, ValidationErrors};
use crate::schema::{Cardinality, FieldKind, FieldSpec, SurveySchema, TextFormat};

#[allow(clippy::expect_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email pattern")
});

/// Whether `value` has the shape of an email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Check one field's current value against its own constraint.
///
/// Visibility is not considered here; callers decide which fields are
/// active.
///
/// # Errors
///
/// Returns the [`FieldErrorKind`] describing the first failed check.
pub fn check_field(spec: &FieldSpec, value: Option<&Answer>) -> Result<(), FieldErrorKind> {
    let missing = || {
        if spec.required {
            Err(FieldErrorKind::MissingRequired)
        } else {
            Ok(())
        }
    };
    let wrong_shape = || FieldErrorKind::FormatInvalid {
        problem: FormatProblem::WrongShape {
            expected: spec.kind.name(),
        },
    };

    match (spec.kind, value) {
        (_, None) => match spec.kind {
            FieldKind::Consent if spec.required => Err(FieldErrorKind::ConsentNotGiven),
            FieldKind::MultiSelect { bound, .. } => check_selection(spec, bound, &[]),
            _ => missing(),
        },

        (FieldKind::Choice { .. }, Some(Answer::Choice(id))) => {
            if id.trim().is_empty() {
                missing()
            } else if spec.kind.has_option(id) {
                Ok(())
            } else {
                Err(FieldErrorKind::FormatInvalid {
                    problem: FormatProblem::NotAnOption { value: id.clone() },
                })
            }
        }

        (FieldKind::MultiSelect { bound, .. }, Some(Answer::Multi(ids))) => {
            check_selection(spec, bound, ids)
        }

        (FieldKind::Scale { min, max, .. }, Some(Answer::Scale(actual))) => {
            if (min..=max).contains(actual) {
                Ok(())
            } else {
                Err(FieldErrorKind::FormatInvalid {
                    problem: FormatProblem::OutOfScale {
                        min,
                        max,
                        actual: *actual,
                    },
                })
            }
        }

        (FieldKind::Text { max_chars, format }, Some(Answer::Text(text))) => {
            if text.trim().is_empty() {
                return missing();
            }
            let actual = text.chars().count();
            if actual > max_chars {
                return Err(FieldErrorKind::FormatInvalid {
                    problem: FormatProblem::TooLong { max_chars, actual },
                });
            }
            // The record keeps the raw text, so the format check sees it too.
            check_format(format, text)
        }

        (FieldKind::Consent, Some(Answer::Flag(given))) => {
            if *given || !spec.required {
                Ok(())
            } else {
                Err(FieldErrorKind::ConsentNotGiven)
            }
        }

        _ => Err(wrong_shape()),
    }
}

fn check_selection(
    spec: &FieldSpec,
    bound: Cardinality,
    ids: &[String],
) -> Result<(), FieldErrorKind> {
    if ids.is_empty() && bound.min == 0 && spec.required {
        return Err(FieldErrorKind::MissingRequired);
    }
    if !spec.required && ids.is_empty() {
        return Ok(());
    }
    if let Some(unknown) = ids.iter().find(|id| !spec.kind.has_option(id)) {
        return Err(FieldErrorKind::FormatInvalid {
            problem: FormatProblem::NotAnOption {
                value: unknown.clone(),
            },
        });
    }
    if bound.admits(ids.len()) {
        Ok(())
    } else {
        Err(FieldErrorKind::CardinalityViolation {
            min: bound.min,
            max: bound.max,
            actual: ids.len(),
        })
    }
}

fn check_format(format: TextFormat, value: &str) -> Result<(), FieldErrorKind> {
    let problem = match format {
        TextFormat::Plain => return Ok(()),
        TextFormat::Email if is_email(value) => return Ok(()),
        TextFormat::Email => FormatProblem::Email,
        TextFormat::Date => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(_) => return Ok(()),
            Err(_) => FormatProblem::Date {
                value: value.to_owned(),
            },
        },
    };
    Err(FieldErrorKind::FormatInvalid { problem })
}

/// Validate every active field of `values` against `schema`.
///
/// # Errors
///
/// Returns [`ValidationErrors`] with one entry per failing active field.
pub fn validate(schema: &SurveySchema, values: &FieldValues) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for field in derive::active_fields(schema, values) {
        if let Err(kind) = check_field(field, values.get(field.name)) {
            errors.insert(field.name, kind);
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::Persona;

    fn owner_field(name: &str) -> &'static FieldSpec {
        Persona::Owner.schema().field(name).unwrap()
    }

    fn tenant_field(name: &str) -> &'static FieldSpec {
        Persona::Tenant.schema().field(name).unwrap()
    }

    fn multi(ids: &[&str]) -> Answer {
        Answer::Multi(ids.iter().map(|id| (*id).to_owned()).collect())
    }

    // ── email ────────────────────────────────────────────────────────

    #[test]
    fn email_shapes() {
        assert!(is_email("mario.rossi@example.it"));
        assert!(is_email("a+b@sub.domain.com"));
        assert!(!is_email("mario.rossi"));
        assert!(!is_email("mario@localhost"));
        assert!(!is_email("@example.it"));
        assert!(!is_email("mario rossi@example.it"));
    }

    // ── choice & text ────────────────────────────────────────────────

    #[test]
    fn required_choice_missing_or_blank() {
        let field = tenant_field("budget");
        assert_eq!(check_field(field, None), Err(FieldErrorKind::MissingRequired));
        assert_eq!(
            check_field(field, Some(&Answer::choice(" "))),
            Err(FieldErrorKind::MissingRequired)
        );
        assert!(check_field(field, Some(&Answer::choice("400_600"))).is_ok());
    }

    #[test]
    fn choice_outside_options_is_format_invalid() {
        let err = check_field(tenant_field("budget"), Some(&Answer::choice("free"))).unwrap_err();
        assert!(matches!(
            err,
            FieldErrorKind::FormatInvalid {
                problem: FormatProblem::NotAnOption { .. }
            }
        ));
    }

    #[test]
    fn wow_factor_is_capped_at_200_chars() {
        let field = tenant_field("wow_factor");
        assert!(check_field(field, None).is_ok());
        assert!(check_field(field, Some(&Answer::text("è".repeat(200)))).is_ok());
        let err = check_field(field, Some(&Answer::text("x".repeat(201)))).unwrap_err();
        assert_eq!(
            err,
            FieldErrorKind::FormatInvalid {
                problem: FormatProblem::TooLong {
                    max_chars: 200,
                    actual: 201
                }
            }
        );
    }

    #[test]
    fn email_field_rejects_malformed_addresses() {
        let field = tenant_field("email");
        assert_eq!(check_field(field, None), Err(FieldErrorKind::MissingRequired));
        assert_eq!(
            check_field(field, Some(&Answer::text("nope"))),
            Err(FieldErrorKind::FormatInvalid {
                problem: FormatProblem::Email
            })
        );
        assert!(check_field(field, Some(&Answer::text("giulia@example.it"))).is_ok());
        assert_eq!(
            check_field(field, Some(&Answer::text(" giulia@example.it "))),
            Err(FieldErrorKind::FormatInvalid {
                problem: FormatProblem::Email
            })
        );
    }

    #[test]
    fn optional_dates_must_be_iso_when_present() {
        let field = tenant_field("move_in_date");
        assert!(check_field(field, None).is_ok());
        assert!(check_field(field, Some(&Answer::text(""))).is_ok());
        assert!(check_field(field, Some(&Answer::text("2025-09-01"))).is_ok());
        assert!(matches!(
            check_field(field, Some(&Answer::text("01/09/2025"))),
            Err(FieldErrorKind::FormatInvalid {
                problem: FormatProblem::Date { .. }
            })
        ));
    }

    // ── multi-select ─────────────────────────────────────────────────

    #[test]
    fn top3_requires_exactly_three() {
        let field = owner_field("top3");
        let short: [&[&str]; 3] = [&[], &["payments"], &["payments", "maintenance"]];
        for ids in short {
            let err = check_field(field, Some(&multi(ids))).unwrap_err();
            assert!(matches!(err, FieldErrorKind::CardinalityViolation { .. }));
        }
        assert!(check_field(field, Some(&multi(&["payments", "maintenance", "contracts"]))).is_ok());
        let err = check_field(
            field,
            Some(&multi(&["payments", "maintenance", "contracts", "expenses"])),
        )
        .unwrap_err();
        assert_eq!(
            err,
            FieldErrorKind::CardinalityViolation {
                min: 3,
                max: Some(3),
                actual: 4
            }
        );
    }

    #[test]
    fn optional_unbounded_selection_may_be_empty() {
        assert!(check_field(tenant_field("event_types"), Some(&multi(&[]))).is_ok());
        assert!(check_field(tenant_field("event_types"), None).is_ok());
    }

    #[test]
    fn unknown_selected_option_is_format_invalid() {
        let err = check_field(tenant_field("priorities"), Some(&multi(&["pool"]))).unwrap_err();
        assert!(matches!(err, FieldErrorKind::FormatInvalid { .. }));
    }

    // ── scale & consent ──────────────────────────────────────────────

    #[test]
    fn scale_outside_range() {
        let field = owner_field("pain_payments");
        assert!(check_field(field, Some(&Answer::scale(5))).is_ok());
        assert!(matches!(
            check_field(field, Some(&Answer::scale(6))),
            Err(FieldErrorKind::FormatInvalid {
                problem: FormatProblem::OutOfScale { actual: 6, .. }
            })
        ));
    }

    #[test]
    fn unchecked_consent() {
        let field = owner_field("privacy_consent");
        assert_eq!(
            check_field(field, Some(&Answer::flag(false))),
            Err(FieldErrorKind::ConsentNotGiven)
        );
        assert_eq!(check_field(field, None), Err(FieldErrorKind::ConsentNotGiven));
        assert!(check_field(field, Some(&Answer::flag(true))).is_ok());
    }

    #[test]
    fn mismatched_shape_is_reported() {
        let err = check_field(owner_field("city"), Some(&Answer::scale(2))).unwrap_err();
        assert_eq!(
            err,
            FieldErrorKind::FormatInvalid {
                problem: FormatProblem::WrongShape { expected: "text" }
            }
        );
    }

    // ── whole record ─────────────────────────────────────────────────

    #[test]
    fn hidden_fields_are_not_validated() {
        let schema = Persona::Owner.schema();
        let mut values = FieldValues::initial(schema);
        values.insert("services_interest", Answer::choice("no"));

        let errors = validate(schema, &values).unwrap_err();
        assert!(errors.get("service_types").is_none());
        assert!(errors.get("features_payments").is_none());
        assert!(errors.get("services_interest").is_none());
        assert!(errors.get("top3").is_some());

        values.insert("services_interest", Answer::choice("maybe"));
        let errors = validate(schema, &values).unwrap_err();
        assert_eq!(
            errors.get("service_types"),
            Some(&FieldErrorKind::CardinalityViolation {
                min: 1,
                max: None,
                actual: 0
            })
        );
    }
}
