//! Core library for the Meet me landing questionnaires.
//!
//! Contains the static owner and tenant survey schemas, the answer model,
//! the pure reducer with its visibility and progress derivations, field
//! validation, the stateful questionnaire engine, and the submit sink
//! abstraction. This crate knows nothing about routing, configuration or
//! where submitted records end up.

pub mod answer;
pub mod derive;
pub mod engine;
pub mod error;
pub mod owner;
pub mod record;
pub mod reducer;
pub mod schema;
pub mod sink;
pub mod tenant;
pub mod validate;

pub use answer::{Answer, FieldValues};
pub use engine::{Counter, Outcome, QuestionnaireEngine};
pub use error::{EngineError, FieldErrorKind, SinkError, SubmitError, ValidationErrors};
pub use record::{SubmissionReceipt, SurveyRecord};
pub use reducer::{IgnoreReason, Phase};
pub use schema::Persona;
pub use sink::{MemorySink, SubmitSink, TracingSink};
