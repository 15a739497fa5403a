//! Declarative questionnaire schemas.
//!
//! A schema is plain `'static` data: sections, and fields carrying their
//! kind, constraints and visibility predicate. The reducer, the derivations
//! and the validator are generic over it, so the owner and tenant
//! questionnaires differ only in the tables in [`owner`](crate::owner) and
//! [`tenant`](crate::tenant).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answer::{Answer, FieldValues};
use crate::error::{CHOOSE_ONE, FieldErrorKind, SchemaError};
use crate::{owner, tenant};

/// The two survey variants offered by the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Owner,
    Tenant,
}

impl Persona {
    pub const ALL: [Self; 2] = [Self::Owner, Self::Tenant];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Tenant => "tenant",
        }
    }

    /// The questionnaire schema mounted for this persona.
    #[must_use]
    pub fn schema(self) -> &'static SurveySchema {
        match self {
            Self::Owner => &owner::OWNER_SCHEMA,
            Self::Tenant => &tenant::TENANT_SCHEMA,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable option: a stable id stored in answers, and its UI label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub id: &'static str,
    pub label: &'static str,
}

impl OptionSpec {
    #[must_use]
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

/// Count constraint on a multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub min: usize,
    /// `None` means unbounded.
    pub max: Option<usize>,
}

impl Cardinality {
    #[must_use]
    pub const fn any() -> Self {
        Self { min: 0, max: None }
    }

    #[must_use]
    pub const fn at_most(max: usize) -> Self {
        Self { min: 0, max: Some(max) }
    }

    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    #[must_use]
    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Whether a selection of `len` entries satisfies the bound.
    #[must_use]
    pub fn admits(&self, len: usize) -> bool {
        len >= self.min && self.max.is_none_or(|max| len <= max)
    }
}

/// Format check applied to a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Email,
    /// ISO `YYYY-MM-DD`.
    Date,
}

/// What a field holds and which constraint it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Choice {
        options: &'static [OptionSpec],
    },
    MultiSelect {
        options: &'static [OptionSpec],
        bound: Cardinality,
    },
    Scale {
        min: u8,
        max: u8,
        default: u8,
    },
    Text {
        max_chars: usize,
        format: TextFormat,
    },
    Consent,
}

impl FieldKind {
    /// Short kind name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Choice { .. } => "choice",
            Self::MultiSelect { .. } => "multi-select",
            Self::Scale { .. } => "scale",
            Self::Text { .. } => "text",
            Self::Consent => "consent",
        }
    }

    /// Declared options; empty for kinds without an option set.
    #[must_use]
    pub const fn options(&self) -> &'static [OptionSpec] {
        match self {
            Self::Choice { options } | Self::MultiSelect { options, .. } => *options,
            _ => &[],
        }
    }

    #[must_use]
    pub fn has_option(&self, id: &str) -> bool {
        self.options().iter().any(|option| option.id == id)
    }

    /// Answer a fresh questionnaire starts with, if the kind has one.
    ///
    /// Scales cannot be unset, so they start at their midpoint default.
    #[must_use]
    pub fn default_answer(&self) -> Option<Answer> {
        match self {
            Self::Scale { default, .. } => Some(Answer::Scale(*default)),
            Self::MultiSelect { .. } => Some(Answer::Multi(Vec::new())),
            Self::Consent => Some(Answer::Flag(false)),
            Self::Choice { .. } | Self::Text { .. } => None,
        }
    }

    /// Whether [`set_field`](crate::engine::QuestionnaireEngine::set_field)
    /// may write `answer` into a field of this kind.
    ///
    /// Multi-selects only change through toggling, never by a direct write.
    #[must_use]
    pub const fn accepts(&self, answer: &Answer) -> bool {
        matches!(
            (self, answer),
            (Self::Choice { .. }, Answer::Choice(_))
                | (Self::Scale { .. }, Answer::Scale(_))
                | (Self::Text { .. }, Answer::Text(_))
                | (Self::Consent, Answer::Flag(_))
        )
    }
}

/// When a governed field is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Always,
    /// Active iff the choice field `field` currently holds one of `values`.
    WhenChoiceIn {
        field: &'static str,
        values: &'static [&'static str],
    },
    /// Active iff `option` is among the first `rank` entries of the ordered
    /// multi-select `field`.
    WhenRankedWithin {
        field: &'static str,
        option: &'static str,
        rank: usize,
    },
}

impl Visibility {
    /// Evaluate the predicate over a field snapshot.
    #[must_use]
    pub fn holds(&self, values: &FieldValues) -> bool {
        match self {
            Self::Always => true,
            Self::WhenChoiceIn { field, values: allowed } => values
                .choice(field)
                .is_some_and(|current| allowed.iter().any(|value| *value == current)),
            Self::WhenRankedWithin { field, option, rank } => values
                .selection(field)
                .iter()
                .take(*rank)
                .any(|selected| selected == option),
        }
    }

    /// The field this predicate reads, if any.
    #[must_use]
    pub const fn trigger(&self) -> Option<&'static str> {
        match self {
            Self::Always => None,
            Self::WhenChoiceIn { field, .. } | Self::WhenRankedWithin { field, .. } => Some(*field),
        }
    }
}

/// One questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub section: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub visibility: Visibility,
    /// Field-specific copy for a missing value or an off-bound selection.
    pub message: Option<&'static str>,
}

impl FieldSpec {
    /// A required, always-visible field.
    #[must_use]
    pub const fn new(
        name: &'static str,
        label: &'static str,
        section: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            label,
            section,
            kind,
            required: true,
            visibility: Visibility::Always,
            message: None,
        }
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub const fn visible_when(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// Message shown next to this field's input when it fails with `kind`.
    ///
    /// The field's own copy covers a missing value and an off-bound
    /// selection. Without it, a missing choice asks to pick an option and
    /// everything else falls back to [`FieldErrorKind::user_message`].
    #[must_use]
    pub fn user_message(&self, kind: &FieldErrorKind) -> String {
        match (kind, self.message) {
            (
                FieldErrorKind::MissingRequired | FieldErrorKind::CardinalityViolation { .. },
                Some(message),
            ) => message.to_owned(),
            (FieldErrorKind::MissingRequired, None)
                if matches!(self.kind, FieldKind::Choice { .. }) =>
            {
                CHOOSE_ONE.to_owned()
            }
            _ => kind.user_message(),
        }
    }
}

/// A logical questionnaire section; each one weighs equally in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
}

/// Full questionnaire description for one persona.
#[derive(Debug)]
pub struct SurveySchema {
    pub persona: Persona,
    pub title: &'static str,
    pub sections: &'static [SectionSpec],
    pub fields: &'static [FieldSpec],
}

impl SurveySchema {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&'static SectionSpec> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Fields belonging to `section`, in declaration order.
    pub fn fields_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'static FieldSpec> + 'a {
        self.fields.iter().filter(move |field| field.section == section)
    }

    /// Verify the schema tables are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found: duplicate field names,
    /// fields in undeclared sections, option-less choices, scale defaults
    /// outside their range, or visibility predicates that reference a
    /// missing field, a field of the wrong kind, or an option the governing
    /// field does not offer.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField { name: field.name });
            }
            if self.section(field.section).is_none() {
                return Err(SchemaError::UnknownSection {
                    field: field.name,
                    section: field.section,
                });
            }
            match field.kind {
                FieldKind::Choice { options } | FieldKind::MultiSelect { options, .. }
                    if options.is_empty() =>
                {
                    return Err(SchemaError::NoOptions { field: field.name });
                }
                FieldKind::Scale { min, max, default } if !(min..=max).contains(&default) => {
                    return Err(SchemaError::ScaleDefault {
                        field: field.name,
                        min,
                        max,
                        default,
                    });
                }
                _ => {}
            }
            self.check_visibility(field)?;
        }
        Ok(())
    }

    fn check_visibility(&self, field: &FieldSpec) -> Result<(), SchemaError> {
        let Some(trigger_name) = field.visibility.trigger() else {
            return Ok(());
        };
        let trigger = self.field(trigger_name).ok_or(SchemaError::UnknownTrigger {
            field: field.name,
            trigger: trigger_name,
        })?;
        let invalid = |reason: String| SchemaError::InvalidTrigger {
            field: field.name,
            trigger: trigger_name,
            reason,
        };

        match (field.visibility, trigger.kind) {
            (Visibility::WhenChoiceIn { values, .. }, FieldKind::Choice { .. }) => {
                if let Some(missing) = values.iter().find(|value| !trigger.kind.has_option(value)) {
                    return Err(invalid(format!("'{missing}' is not an option")));
                }
            }
            (Visibility::WhenRankedWithin { option, rank, .. }, FieldKind::MultiSelect { .. }) => {
                if !trigger.kind.has_option(option) {
                    return Err(invalid(format!("'{option}' is not an option")));
                }
                if rank == 0 {
                    return Err(invalid("rank must be at least 1".to_owned()));
                }
            }
            (_, kind) => {
                return Err(invalid(format!("predicate cannot read a {} field", kind.name())));
            }
        }
        Ok(())
    }
}
