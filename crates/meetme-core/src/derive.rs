//! Derived questionnaire state: visibility and progress.
//!
//! Everything here is a pure function of the schema and a field snapshot.
//! Nothing is cached between events, so two snapshots with equal values
//! always derive equal results regardless of the edits that produced them.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::answer::FieldValues;
use crate::schema::{FieldSpec, SurveySchema};
use crate::validate;

/// Derived view recomputed after every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derived {
    /// Sections with at least one active field.
    pub visible_sections: BTreeSet<&'static str>,
    /// Fields whose visibility predicate holds.
    pub visible_fields: BTreeSet<&'static str>,
    /// Share of complete sections, in `[0, 1]`.
    pub progress: f64,
}

/// Fields whose visibility predicate holds, in schema order.
pub fn active_fields<'a>(
    schema: &'a SurveySchema,
    values: &'a FieldValues,
) -> impl Iterator<Item = &'static FieldSpec> + 'a {
    schema
        .fields
        .iter()
        .filter(move |field| field.visibility.holds(values))
}

#[must_use]
pub fn visible_fields(schema: &SurveySchema, values: &FieldValues) -> BTreeSet<&'static str> {
    active_fields(schema, values).map(|field| field.name).collect()
}

#[must_use]
pub fn visible_sections(schema: &SurveySchema, values: &FieldValues) -> BTreeSet<&'static str> {
    active_fields(schema, values).map(|field| field.section).collect()
}

/// Whether `section` counts towards progress.
///
/// A section is complete when it is visible and every active required field
/// in it passes its own check. For the owner deep-dive this means each
/// block opened by the first two priorities has a feature selected.
#[must_use]
pub fn section_complete(schema: &SurveySchema, values: &FieldValues, section: &str) -> bool {
    let mut visible = false;
    for field in schema.fields_in(section) {
        if !field.visibility.holds(values) {
            continue;
        }
        visible = true;
        if field.required && validate::check_field(field, values.get(field.name)).is_err() {
            return false;
        }
    }
    visible
}

/// Share of complete sections. Every section weighs the same regardless of
/// how many fields it has.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress(schema: &SurveySchema, values: &FieldValues) -> f64 {
    if schema.sections.is_empty() {
        return 0.0;
    }
    let complete = schema
        .sections
        .iter()
        .filter(|section| section_complete(schema, values, section.id))
        .count();
    complete as f64 / schema.sections.len() as f64
}

#[must_use]
pub fn derive(schema: &SurveySchema, values: &FieldValues) -> Derived {
    Derived {
        visible_sections: visible_sections(schema, values),
        visible_fields: visible_fields(schema, values),
        progress: progress(schema, values),
    }
}
