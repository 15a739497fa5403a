//! The submitted questionnaire record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::answer::Answer;
use crate::schema::Persona;

/// One finished questionnaire, as handed to a [`SubmitSink`](crate::sink::SubmitSink).
///
/// Holds only the answers of fields that were active at submit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRecord {
    /// Unique submission ID.
    pub submission_id: Uuid,
    /// Which questionnaire produced this record.
    pub segment: Persona,
    /// When the record was finalized.
    pub submitted_at: DateTime<Utc>,
    /// Active answers keyed by field name.
    pub answers: BTreeMap<&'static str, Answer>,
}

impl SurveyRecord {
    /// Stamp a fresh record with a new ID and the current time.
    #[must_use]
    pub fn new(segment: Persona, answers: BTreeMap<&'static str, Answer>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            segment,
            submitted_at: Utc::now(),
            answers,
        }
    }

    /// JSON form of the record.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the record cannot be encoded.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Confirmation returned by a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub segment: Persona,
    pub submitted_at: DateTime<Utc>,
}

impl From<&SurveyRecord> for SubmissionReceipt {
    fn from(record: &SurveyRecord) -> Self {
        Self {
            submission_id: record.submission_id,
            segment: record.segment,
            submitted_at: record.submitted_at,
        }
    }
}
