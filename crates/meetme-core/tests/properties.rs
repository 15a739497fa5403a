//! Property tests for the questionnaire reducer.

#![allow(clippy::unwrap_used)]

use meetme_core::reducer::{SurveyEvent, SurveyState, reduce};
use meetme_core::schema::{FieldKind, FieldSpec, Persona, SurveySchema, TextFormat};
use meetme_core::Answer;
use proptest::prelude::*;
use proptest::sample::Index;

#[derive(Debug, Clone)]
enum Step {
    Toggle(Index, Index),
    Choose(Index, Index),
}

fn multi_fields(schema: &SurveySchema) -> Vec<&'static FieldSpec> {
    schema
        .fields
        .iter()
        .filter(|field| matches!(field.kind, FieldKind::MultiSelect { .. }))
        .collect()
}

fn choice_fields(schema: &SurveySchema) -> Vec<&'static FieldSpec> {
    schema
        .fields
        .iter()
        .filter(|field| matches!(field.kind, FieldKind::Choice { .. }))
        .collect()
}

fn to_event(schema: &SurveySchema, step: &Step) -> SurveyEvent {
    let (fields, field, option) = match step {
        Step::Toggle(field, option) => (multi_fields(schema), field, option),
        Step::Choose(field, option) => (choice_fields(schema), field, option),
    };
    let spec = fields[field.index(fields.len())];
    let options = spec.kind.options();
    let id = options[option.index(options.len())].id.to_owned();
    match step {
        Step::Toggle(..) => SurveyEvent::ToggleOption {
            name: spec.name.to_owned(),
            option: id,
        },
        Step::Choose(..) => SurveyEvent::SetField {
            name: spec.name.to_owned(),
            value: Answer::Choice(id),
        },
    }
}

fn apply(state: SurveyState, event: SurveyEvent) -> SurveyState {
    reduce(&state, event).unwrap().state
}

fn fill(state: SurveyState, events: &[SurveyEvent]) -> SurveyState {
    events.iter().cloned().fold(state, apply)
}

fn run(persona: Persona, steps: &[Step]) -> SurveyState {
    let schema = persona.schema();
    steps.iter().fold(SurveyState::new(schema), |state, step| {
        apply(state, to_event(schema, step))
    })
}

/// Rebuild a snapshot from scratch by the shortest path.
fn replay(source: &SurveyState) -> SurveyState {
    let mut state = SurveyState::new(source.schema());
    for (name, answer) in source.fields().iter() {
        match answer {
            Answer::Multi(ids) => {
                for id in ids {
                    state = apply(
                        state,
                        SurveyEvent::ToggleOption {
                            name: name.to_owned(),
                            option: id.clone(),
                        },
                    );
                }
            }
            other => {
                state = apply(
                    state,
                    SurveyEvent::SetField {
                        name: name.to_owned(),
                        value: other.clone(),
                    },
                );
            }
        }
    }
    state
}

/// Edits that leave an empty field passing its own check. Multi-selects
/// are filled through toggles with the smallest count their bound admits.
fn valid_fill(spec: &FieldSpec) -> Vec<SurveyEvent> {
    let set = |value: Answer| {
        vec![SurveyEvent::SetField {
            name: spec.name.to_owned(),
            value,
        }]
    };
    match spec.kind {
        FieldKind::Choice { options } => set(Answer::choice(options[0].id)),
        FieldKind::MultiSelect { options, bound } => {
            let count = bound.min.max(1).min(bound.max.unwrap_or(usize::MAX));
            options
                .iter()
                .take(count)
                .map(|option| SurveyEvent::ToggleOption {
                    name: spec.name.to_owned(),
                    option: option.id.to_owned(),
                })
                .collect()
        }
        FieldKind::Text {
            format: TextFormat::Email,
            ..
        } => set(Answer::text("chiara@example.it")),
        FieldKind::Text {
            format: TextFormat::Date,
            ..
        } => set(Answer::text("2025-10-01")),
        FieldKind::Text { .. } => set(Answer::text("Bologna")),
        FieldKind::Consent => set(Answer::flag(true)),
        FieldKind::Scale { .. } => Vec::new(),
    }
}

fn arb_persona() -> impl Strategy<Value = Persona> {
    prop_oneof![Just(Persona::Owner), Just(Persona::Tenant)]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (any::<Index>(), any::<Index>()).prop_map(|(field, option)| Step::Toggle(field, option)),
        1 => (any::<Index>(), any::<Index>()).prop_map(|(field, option)| Step::Choose(field, option)),
    ]
}

fn arb_toggle() -> impl Strategy<Value = Step> {
    (any::<Index>(), any::<Index>()).prop_map(|(field, option)| Step::Toggle(field, option))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// No toggle sequence pushes a bounded multi-select past its maximum
    /// or selects the same option twice.
    #[test]
    fn multi_select_bound_holds(
        persona in arb_persona(),
        steps in prop::collection::vec(arb_step(), 0..80),
    ) {
        let schema = persona.schema();
        let mut state = SurveyState::new(schema);
        for step in &steps {
            state = apply(state, to_event(schema, step));
            for spec in multi_fields(schema) {
                let FieldKind::MultiSelect { bound, .. } = spec.kind else { continue };
                let selected = state.fields().selection(spec.name);
                if let Some(max) = bound.max {
                    prop_assert!(selected.len() <= max, "{} holds {} > {max}", spec.name, selected.len());
                }
                let mut unique = selected.to_vec();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), selected.len());
            }
            let progress = state.derived().progress;
            prop_assert!((0.0..=1.0).contains(&progress));
        }
    }

    /// Visibility and progress depend only on the final snapshot, not on
    /// the edits that produced it.
    #[test]
    fn derivation_is_path_independent(
        persona in arb_persona(),
        steps in prop::collection::vec(arb_step(), 0..80),
    ) {
        let walked = run(persona, &steps);
        let direct = replay(&walked);
        prop_assert_eq!(direct.fields(), walked.fields());
        prop_assert_eq!(direct.derived(), walked.derived());
        prop_assert_eq!(walked.derived(), walked.derived());
    }

    /// Filling a previously empty required field never lowers progress.
    #[test]
    fn progress_is_monotonic_in_required_fields(
        persona in arb_persona(),
        toggles in prop::collection::vec(arb_toggle(), 0..20),
        mask in prop::collection::vec(any::<bool>(), 32),
    ) {
        let schema = persona.schema();
        let required: Vec<(&'static FieldSpec, Vec<SurveyEvent>)> = schema
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| (field, valid_fill(field)))
            .filter(|(_, events)| !events.is_empty())
            .collect();

        // Random toggles may already have touched a multi-select; only
        // untouched ones count as empty.
        let mut base = run(persona, &toggles);
        let mut empty = Vec::new();
        for (i, (spec, events)) in required.iter().enumerate() {
            let is_multi = matches!(spec.kind, FieldKind::MultiSelect { .. });
            if is_multi && !base.fields().selection(spec.name).is_empty() {
                continue;
            }
            if mask[i % mask.len()] {
                base = fill(base, events);
            } else {
                empty.push((spec, events));
            }
        }

        let before = base.derived().progress;
        prop_assert!((0.0..=1.0).contains(&before));
        for (spec, events) in empty {
            let filled = fill(base.clone(), events);
            if let FieldKind::MultiSelect { bound, .. } = spec.kind {
                prop_assert!(bound.admits(filled.fields().selection(spec.name).len()));
            }
            let after = filled.derived().progress;
            prop_assert!(after >= before, "filling {} lowered progress {before} -> {after}", spec.name);
            prop_assert!(after <= 1.0);
        }
    }
}

#[test]
fn owner_branching_fields_have_a_fill() {
    let schema = Persona::Owner.schema();
    for name in ["top3", "features_payments", "service_types"] {
        let spec = schema.field(name).unwrap();
        assert!(!valid_fill(spec).is_empty(), "{name} has no fill");
    }
}
