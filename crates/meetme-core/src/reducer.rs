//! Pure questionnaire reducer.
//!
//! `reduce(state, event)` returns the next state plus an [`Effect`] for the
//! caller to act on. It performs no I/O and reads no clock, which keeps every
//! questionnaire replayable from its event log. Stamping and delivering the
//! finished record is left to [`QuestionnaireEngine`](crate::engine::QuestionnaireEngine).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::answer::{Answer, FieldValues};
use crate::derive::{self, Derived};
use crate::error::{EngineError, ValidationErrors};
use crate::schema::{FieldKind, FieldSpec, SurveySchema};
use crate::validate;

/// Questionnaire lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Editing,
    /// Terminal: no further edits are accepted.
    Submitted,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyEvent {
    SetField { name: String, value: Answer },
    ToggleOption { name: String, option: String },
    Submit,
}

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The multi-select is full and the option is not selected.
    AtCapacity,
    /// The questionnaire was already submitted.
    Submitted,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Applied,
    Ignored(IgnoreReason),
    /// Submit failed validation; the phase is unchanged.
    Rejected(ValidationErrors),
    /// Submit succeeded; these are the active answers to hand to the sink.
    Finalized(BTreeMap<&'static str, Answer>),
}

/// Result of one reducer step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SurveyState,
    pub effect: Effect,
}

/// Complete questionnaire state. Derived values are computed on demand.
#[derive(Debug, Clone)]
pub struct SurveyState {
    schema: &'static SurveySchema,
    fields: FieldValues,
    phase: Phase,
}

// Schemas are static; identity is enough.
impl PartialEq for SurveyState {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema)
            && self.phase == other.phase
            && self.fields == other.fields
    }
}

impl SurveyState {
    /// A fresh, editable questionnaire with default answers.
    #[must_use]
    pub fn new(schema: &'static SurveySchema) -> Self {
        Self {
            schema,
            fields: FieldValues::initial(schema),
            phase: Phase::Editing,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &'static SurveySchema {
        self.schema
    }

    #[must_use]
    pub fn fields(&self) -> &FieldValues {
        &self.fields
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn derived(&self) -> Derived {
        derive::derive(self.schema, &self.fields)
    }

    /// Whether any answer differs from the fresh defaults.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.fields != FieldValues::initial(self.schema)
    }

    fn with_fields(&self, fields: FieldValues) -> Self {
        Self {
            schema: self.schema,
            fields,
            phase: self.phase,
        }
    }
}

/// Toggle `option` in an ordered selection bounded by `max`.
///
/// Removes the option if selected; otherwise appends it when there is room.
/// Returns `None` when the selection is full and the option is not in it,
/// leaving the caller's selection unchanged.
#[must_use]
pub fn toggle_multi_select(current: &[String], option: &str, max: Option<usize>) -> Option<Vec<String>> {
    if current.iter().any(|selected| selected == option) {
        return Some(
            current
                .iter()
                .filter(|selected| *selected != option)
                .cloned()
                .collect(),
        );
    }
    if max.is_some_and(|max| current.len() >= max) {
        return None;
    }
    let mut next = current.to_vec();
    next.push(option.to_owned());
    Some(next)
}

/// Apply one event.
///
/// # Errors
///
/// Returns [`EngineError`] when the event names a field or option the schema
/// does not declare, or writes a value whose shape the field cannot hold.
/// Edits after submission are never errors, not even malformed ones; they
/// come back as [`Effect::Ignored`].
pub fn reduce(state: &SurveyState, event: SurveyEvent) -> Result<Transition, EngineError> {
    match event {
        SurveyEvent::SetField { name, value } => reduce_set(state, &name, value),
        SurveyEvent::ToggleOption { name, option } => reduce_toggle(state, &name, &option),
        SurveyEvent::Submit => Ok(reduce_submit(state)),
    }
}

fn lookup(schema: &SurveySchema, name: &str) -> Result<&'static FieldSpec, EngineError> {
    schema.field(name).ok_or_else(|| EngineError::UnknownField {
        name: name.to_owned(),
    })
}

fn unchanged(state: &SurveyState, effect: Effect) -> Transition {
    Transition {
        state: state.clone(),
        effect,
    }
}

fn reduce_set(state: &SurveyState, name: &str, value: Answer) -> Result<Transition, EngineError> {
    if state.phase == Phase::Submitted {
        return Ok(unchanged(state, Effect::Ignored(IgnoreReason::Submitted)));
    }
    let spec = lookup(state.schema, name)?;
    if !spec.kind.accepts(&value) {
        return Err(EngineError::KindMismatch {
            field: spec.name,
            kind: spec.kind.name(),
            given: value.shape(),
        });
    }

    let mut fields = state.fields.clone();
    fields.insert(spec.name, value);
    Ok(Transition {
        state: state.with_fields(fields),
        effect: Effect::Applied,
    })
}

fn reduce_toggle(state: &SurveyState, name: &str, option: &str) -> Result<Transition, EngineError> {
    if state.phase == Phase::Submitted {
        return Ok(unchanged(state, Effect::Ignored(IgnoreReason::Submitted)));
    }
    let spec = lookup(state.schema, name)?;
    let FieldKind::MultiSelect { bound, .. } = spec.kind else {
        return Err(EngineError::KindMismatch {
            field: spec.name,
            kind: spec.kind.name(),
            given: "toggle",
        });
    };
    if !spec.kind.has_option(option) {
        return Err(EngineError::UnknownOption {
            field: spec.name,
            option: option.to_owned(),
        });
    }

    let Some(next) = toggle_multi_select(state.fields.selection(spec.name), option, bound.max) else {
        return Ok(unchanged(state, Effect::Ignored(IgnoreReason::AtCapacity)));
    };
    let mut fields = state.fields.clone();
    fields.insert(spec.name, Answer::Multi(next));
    Ok(Transition {
        state: state.with_fields(fields),
        effect: Effect::Applied,
    })
}

/// The submit step. Never fails: validation problems are an effect.
#[must_use]
pub fn reduce_submit(state: &SurveyState) -> Transition {
    if state.phase == Phase::Submitted {
        return unchanged(state, Effect::Ignored(IgnoreReason::Submitted));
    }
    if let Err(errors) = validate::validate(state.schema, &state.fields) {
        return unchanged(state, Effect::Rejected(errors));
    }

    let answers = derive::active_fields(state.schema, &state.fields)
        .filter_map(|field| {
            state
                .fields
                .get(field.name)
                .filter(|answer| has_content(answer))
                .map(|answer| (field.name, answer.clone()))
        })
        .collect();
    Transition {
        state: SurveyState {
            schema: state.schema,
            fields: state.fields.clone(),
            phase: Phase::Submitted,
        },
        effect: Effect::Finalized(answers),
    }
}

fn has_content(answer: &Answer) -> bool {
    match answer {
        Answer::Text(text) | Answer::Choice(text) => !text.trim().is_empty(),
        Answer::Multi(_) | Answer::Scale(_) | Answer::Flag(_) => true,
    }
}
