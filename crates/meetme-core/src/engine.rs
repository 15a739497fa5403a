//! The questionnaire engine mounted by a persona view.
//!
//! A thin stateful shell around [`reduce`]: it owns the current
//! [`SurveyState`], replays each UI interaction through the reducer and
//! performs the one side effect the reducer asks for, delivering the
//! finalized record to the injected [`SubmitSink`].

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::answer::{Answer, FieldValues};
use crate::derive::Derived;
use crate::error::{EngineError, SubmitError};
use crate::record::{SubmissionReceipt, SurveyRecord};
use crate::reducer::{self, Effect, IgnoreReason, Phase, SurveyEvent, SurveyState, reduce};
use crate::schema::{FieldKind, Persona, SurveySchema};
use crate::sink::SubmitSink;

/// Result of a field mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The edit was stored; carries the freshly derived view.
    Applied(Derived),
    /// The edit was dropped without error.
    Ignored(IgnoreReason),
}

impl Outcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// A `used/limit` counter shown next to bounded inputs ("2/3").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    pub used: usize,
    /// `None` for unbounded multi-selects.
    pub limit: Option<usize>,
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.limit {
            Some(limit) => write!(f, "{}/{limit}", self.used),
            None => write!(f, "{}", self.used),
        }
    }
}

/// One persona's questionnaire, from first edit to submission.
pub struct QuestionnaireEngine {
    state: SurveyState,
    sink: Arc<dyn SubmitSink>,
    receipt: Option<SubmissionReceipt>,
}

impl QuestionnaireEngine {
    /// Mount the built-in questionnaire for `persona`.
    #[must_use]
    pub fn new(persona: Persona, sink: Arc<dyn SubmitSink>) -> Self {
        Self::with_schema(persona.schema(), sink)
    }

    /// Mount an arbitrary static schema.
    #[must_use]
    pub fn with_schema(schema: &'static SurveySchema, sink: Arc<dyn SubmitSink>) -> Self {
        debug!(persona = %schema.persona, sink = sink.name(), "questionnaire mounted");
        Self {
            state: SurveyState::new(schema),
            sink,
            receipt: None,
        }
    }

    #[must_use]
    pub fn persona(&self) -> Persona {
        self.state.schema().persona
    }

    #[must_use]
    pub fn schema(&self) -> &'static SurveySchema {
        self.state.schema()
    }

    #[must_use]
    pub fn state(&self) -> &SurveyState {
        &self.state
    }

    #[must_use]
    pub fn fields(&self) -> &FieldValues {
        self.state.fields()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.state.phase() == Phase::Submitted
    }

    /// Whether closing now would discard edits.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Receipt of the successful submit, if any.
    #[must_use]
    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// Visibility and progress for the current answers.
    #[must_use]
    pub fn derived(&self) -> Derived {
        self.state.derived()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.derived().progress
    }

    /// Store a choice, rating, text or consent value.
    ///
    /// Values are not validated here; an out-of-set choice or malformed
    /// email is reported by [`submit`](Self::submit).
    ///
    /// # Errors
    ///
    /// While editing, returns [`EngineError`] for an unknown field or a value
    /// whose shape the field cannot hold. Multi-selects change only through
    /// [`toggle_option`](Self::toggle_option).
    pub fn set_field(&mut self, name: &str, value: Answer) -> Result<Outcome, EngineError> {
        self.dispatch(SurveyEvent::SetField {
            name: name.to_owned(),
            value,
        })
    }

    /// Select or deselect `option` in a multi-select.
    ///
    /// A full selection silently refuses new options and reports
    /// [`IgnoreReason::AtCapacity`].
    ///
    /// # Errors
    ///
    /// While editing, returns [`EngineError`] for an unknown field or option,
    /// or when the field is not a multi-select.
    pub fn toggle_option(&mut self, name: &str, option: &str) -> Result<Outcome, EngineError> {
        self.dispatch(SurveyEvent::ToggleOption {
            name: name.to_owned(),
            option: option.to_owned(),
        })
    }

    fn dispatch(&mut self, event: SurveyEvent) -> Result<Outcome, EngineError> {
        debug!(persona = %self.persona(), event = ?event, "questionnaire event");
        let transition = reduce(&self.state, event)?;
        self.state = transition.state;
        match transition.effect {
            Effect::Ignored(reason) => {
                debug!(persona = %self.persona(), reason = ?reason, "event ignored");
                Ok(Outcome::Ignored(reason))
            }
            Effect::Applied => Ok(Outcome::Applied(self.state.derived())),
            Effect::Rejected(_) | Effect::Finalized(_) => {
                unreachable!("only a submit event rejects or finalizes")
            }
        }
    }

    /// Whether the control for `option` should be enabled.
    ///
    /// Selected options can always be removed; unselected ones only while
    /// the selection has room. Unknown fields and options report `false`.
    #[must_use]
    pub fn is_option_enabled(&self, name: &str, option: &str) -> bool {
        let Some(spec) = self.schema().field(name) else {
            return false;
        };
        let FieldKind::MultiSelect { bound, .. } = spec.kind else {
            return false;
        };
        if self.is_submitted() || !spec.kind.has_option(option) {
            return false;
        }
        let selected = self.fields().selection(name);
        selected.iter().any(|id| id == option) || bound.max.is_none_or(|max| selected.len() < max)
    }

    /// Counter for a multi-select (selections) or text field (characters).
    #[must_use]
    pub fn completion_hint(&self, name: &str) -> Option<Counter> {
        let spec = self.schema().field(name)?;
        match spec.kind {
            FieldKind::MultiSelect { bound, .. } => Some(Counter {
                used: self.fields().selection(name).len(),
                limit: bound.max,
            }),
            FieldKind::Text { max_chars, .. } => {
                let used = match self.fields().get(name) {
                    Some(Answer::Text(text)) => text.chars().count(),
                    _ => 0,
                };
                Some(Counter {
                    used,
                    limit: Some(max_chars),
                })
            }
            _ => None,
        }
    }

    /// Validate the active fields and hand the record to the sink.
    ///
    /// The sink is called at most once per engine. A sink failure is logged
    /// and does not undo the submission.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] with one entry per failing active
    /// field (the engine stays editable), or
    /// [`SubmitError::AlreadySubmitted`] on a repeated submit.
    pub fn submit(&mut self) -> Result<SubmissionReceipt, SubmitError> {
        let persona = self.persona();
        let transition = reducer::reduce_submit(&self.state);
        let answers = match transition.effect {
            Effect::Finalized(answers) => answers,
            Effect::Rejected(errors) => {
                info!(
                    persona = %persona,
                    failing = errors.len(),
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "submission rejected"
                );
                return Err(SubmitError::Invalid(errors));
            }
            // reduce_submit only ignores an already submitted state.
            Effect::Applied | Effect::Ignored(_) => return Err(SubmitError::AlreadySubmitted),
        };
        self.state = transition.state;

        let record = SurveyRecord::new(persona, answers);
        if let Err(e) = self.sink.deliver(&record) {
            error!(
                persona = %persona,
                submission_id = %record.submission_id,
                sink = self.sink.name(),
                error = %e,
                "submit sink failed"
            );
        }

        let receipt = SubmissionReceipt::from(&record);
        info!(
            persona = %persona,
            submission_id = %receipt.submission_id,
            answers = record.answers.len(),
            "questionnaire submitted"
        );
        self.receipt = Some(receipt);
        Ok(receipt)
    }
}

impl fmt::Debug for QuestionnaireEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionnaireEngine")
            .field("persona", &self.persona())
            .field("phase", &self.phase())
            .field("sink", &self.sink.name())
            .finish_non_exhaustive()
    }
}
