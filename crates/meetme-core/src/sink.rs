//! Submit sinks: where finished records go.
//!
//! The engine hands each finalized [`SurveyRecord`] to exactly one sink.
//! Delivery failures are logged by the engine and never roll back the
//! submission, so a sink only has to report what went wrong.

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::error::SinkError;
use crate::record::SurveyRecord;

/// Destination for submitted records.
///
/// Implementations must be safe to share between sessions.
pub trait SubmitSink: Send + Sync {
    /// The sink's name (for error reporting).
    fn name(&self) -> &str;

    /// Deliver one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be encoded or handed over.
    fn deliver(&self, record: &SurveyRecord) -> Result<(), SinkError>;
}

/// Emits every record as a structured `tracing` event.
///
/// Events go to the `meetme::submission` target at info level with the
/// record's JSON as the `payload` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SubmitSink for TracingSink {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "tracing"
    }

    fn deliver(&self, record: &SurveyRecord) -> Result<(), SinkError> {
        let payload = serde_json::to_string(record).map_err(|e| SinkError::Serialization {
            sink: self.name().to_owned(),
            reason: e.to_string(),
        })?;
        info!(
            target: "meetme::submission",
            submission_id = %record.submission_id,
            segment = %record.segment,
            payload = %payload,
            "questionnaire submitted"
        );
        Ok(())
    }
}

/// In-memory sink for tests and local development.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to the engine.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<SurveyRecord>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every delivered record, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<SurveyRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SubmitSink for MemorySink {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "memory"
    }

    fn deliver(&self, record: &SurveyRecord) -> Result<(), SinkError> {
        let mut records = self.records.lock().map_err(|e| SinkError::Delivery {
            sink: self.name().to_owned(),
            reason: format!("record buffer lock poisoned: {e}"),
        })?;
        records.push(record.clone());
        Ok(())
    }
}
