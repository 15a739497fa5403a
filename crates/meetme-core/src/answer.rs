//! Answer values and the per-questionnaire field map.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::SurveySchema;

/// A single answer held by a questionnaire field.
///
/// Serializes untagged, so a record reads as plain JSON: strings for choices
/// and text, arrays for multi-selects, numbers for ratings and booleans for
/// consent flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// One option id from a fixed set.
    Choice(String),
    /// Option ids in the order they were selected.
    Multi(Vec<String>),
    /// A rating on a bounded integer scale.
    Scale(u8),
    /// Free text (plain, email or date).
    Text(String),
    /// A boolean consent flag.
    Flag(bool),
}

impl Answer {
    pub fn choice(id: impl Into<String>) -> Self {
        Self::Choice(id.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn scale(value: u8) -> Self {
        Self::Scale(value)
    }

    #[must_use]
    pub const fn flag(value: bool) -> Self {
        Self::Flag(value)
    }

    /// Short name of the answer shape, used in error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Choice(_) => "choice",
            Self::Multi(_) => "multi-select",
            Self::Scale(_) => "scale",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
        }
    }
}

/// Current answers of one questionnaire, keyed by schema field name.
///
/// Keys are always the `'static` names declared by the schema, so the map
/// can never hold a field the schema does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValues {
    values: BTreeMap<&'static str, Answer>,
}

impl FieldValues {
    /// The starting answers for `schema`: every field with a natural default
    /// (scales at their midpoint, empty selections, unchecked consent).
    #[must_use]
    pub fn initial(schema: &SurveySchema) -> Self {
        let values = schema
            .fields
            .iter()
            .filter_map(|field| field.kind.default_answer().map(|answer| (field.name, answer)))
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.values.get(name)
    }

    /// Store `answer` under `name`, returning the previous answer.
    pub fn insert(&mut self, name: &'static str, answer: Answer) -> Option<Answer> {
        self.values.insert(name, answer)
    }

    /// The selected option of a choice field, if set.
    #[must_use]
    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(Answer::Choice(id)) => Some(id.as_str()),
            _ => None,
        }
    }

    /// The ordered selection of a multi-select field; empty when unset.
    #[must_use]
    pub fn selection(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(Answer::Multi(ids)) => ids.as_slice(),
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Answer)> {
        self.values.iter().map(|(name, answer)| (*name, answer))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::schema::Persona;

    #[test]
    fn initial_values_hold_scale_midpoints_and_empty_selections() {
        let values = FieldValues::initial(Persona::Owner.schema());
        assert_eq!(values.get("pain_payments"), Some(&Answer::Scale(3)));
        assert_eq!(values.get("value_communication"), Some(&Answer::Scale(3)));
        assert!(values.selection("top3").is_empty());
        assert_eq!(values.get("privacy_consent"), Some(&Answer::Flag(false)));
        assert_eq!(values.get("email"), None);
    }

    #[test]
    fn answers_serialize_as_plain_json() {
        let mut values = FieldValues::default();
        values.insert("budget", Answer::choice("400_600"));
        values.insert("priorities", Answer::Multi(vec!["price".to_owned()]));
        values.insert("pain_payments", Answer::scale(4));
        values.insert("privacy_consent", Answer::flag(true));

        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "budget": "400_600",
                "pain_payments": 4,
                "priorities": ["price"],
                "privacy_consent": true,
            })
        );
    }

    #[test]
    fn accessors_ignore_other_shapes() {
        let mut values = FieldValues::default();
        values.insert("events_interest", Answer::text("interested"));
        assert_eq!(values.choice("events_interest"), None);
        assert!(values.selection("events_interest").is_empty());
    }
}
