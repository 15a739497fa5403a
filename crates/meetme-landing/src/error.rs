//! Error types for the landing session.

use meetme_core::Persona;

/// Errors from the post-submission share action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// No questionnaire is open.
    #[error("no questionnaire is open")]
    NoPersona,

    /// The open questionnaire has not been submitted yet.
    #[error("the {persona} questionnaire has not been submitted")]
    NotSubmitted { persona: Persona },

    /// The clipboard or platform share target refused the message.
    #[error("share channel '{channel}' failed: {reason}")]
    Channel { channel: String, reason: String },
}

/// Errors from installing the global tracing subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The log filter could not be parsed.
    #[error("invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {reason}")]
    AlreadyInstalled { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_errors_name_the_problem() {
        let err = ShareError::NotSubmitted {
            persona: Persona::Owner,
        };
        assert_eq!(err.to_string(), "the owner questionnaire has not been submitted");

        let err = ShareError::Channel {
            channel: "clipboard".to_owned(),
            reason: "denied".to_owned(),
        };
        assert!(err.to_string().contains("clipboard"));
    }
}
