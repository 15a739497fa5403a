//! One visitor's landing page: router plus the mounted questionnaire.

use std::fmt;
use std::sync::Arc;

use meetme_core::{Persona, QuestionnaireEngine, SubmitSink};
use tracing::{info, warn};

use crate::config::LandingConfig;
use crate::error::ShareError;
use crate::router::{SegmentRouter, SegmentSelection};
use crate::share::{ShareChannel, ShareMessage};

/// Owns the segment router and at most one questionnaire engine.
///
/// The engine lives exactly as long as its persona stays selected: closing
/// or switching drops it together with any unsent answers.
pub struct LandingSession {
    router: SegmentRouter,
    engine: Option<QuestionnaireEngine>,
    sink: Arc<dyn SubmitSink>,
    config: LandingConfig,
}

impl LandingSession {
    #[must_use]
    pub fn new(config: LandingConfig, sink: Arc<dyn SubmitSink>) -> Self {
        Self {
            router: SegmentRouter::new(),
            engine: None,
            sink,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> SegmentSelection {
        self.router.selection()
    }

    #[must_use]
    pub fn engine(&self) -> Option<&QuestionnaireEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut QuestionnaireEngine> {
        self.engine.as_mut()
    }

    /// Open `persona`'s questionnaire.
    ///
    /// Mounts a fresh engine when the selection changes; re-selecting the
    /// open persona keeps its answers. Returns whether a new engine was
    /// mounted.
    pub fn select(&mut self, persona: Persona) -> bool {
        if !self.router.select(persona) {
            return false;
        }
        self.discard("switch");
        self.engine = Some(QuestionnaireEngine::new(persona, Arc::clone(&self.sink)));
        info!(persona = %persona, "questionnaire opened");
        true
    }

    /// Back to the splash chooser, dropping the open questionnaire.
    ///
    /// Returns whether a questionnaire was open.
    pub fn close(&mut self) -> bool {
        if !self.router.close() {
            return false;
        }
        self.discard("close");
        true
    }

    fn discard(&mut self, reason: &'static str) {
        let Some(engine) = self.engine.take() else {
            return;
        };
        if engine.is_dirty() && !engine.is_submitted() {
            warn!(
                persona = %engine.persona(),
                reason,
                progress = engine.progress(),
                "discarding unsubmitted answers"
            );
        }
    }

    /// Share the page after a successful submit.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::NoPersona`] on the splash page,
    /// [`ShareError::NotSubmitted`] before the open questionnaire is
    /// submitted, or the channel's own error.
    pub fn share(&self, channel: &dyn ShareChannel) -> Result<ShareMessage, ShareError> {
        let engine = self.engine.as_ref().ok_or(ShareError::NoPersona)?;
        let persona = engine.persona();
        if !engine.is_submitted() {
            return Err(ShareError::NotSubmitted { persona });
        }
        let message = ShareMessage::for_persona(persona, &self.config);
        channel.share(&message)?;
        info!(persona = %persona, channel = channel.name(), "page shared");
        Ok(message)
    }
}

impl fmt::Debug for LandingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LandingSession")
            .field("selection", &self.router.selection())
            .field("engine", &self.engine)
            .field("sink", &self.sink.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use meetme_core::{Answer, MemorySink};

    use super::*;

    fn session() -> LandingSession {
        LandingSession::new(LandingConfig::default(), Arc::new(MemorySink::new()))
    }

    #[test]
    fn splash_has_no_engine() {
        let session = session();
        assert_eq!(session.selection(), SegmentSelection::None);
        assert!(session.engine().is_none());
    }

    #[test]
    fn reselecting_keeps_answers_switching_drops_them() {
        let mut session = session();
        assert!(session.select(Persona::Tenant));
        session
            .engine_mut()
            .unwrap()
            .set_field("budget", Answer::choice("400_600"))
            .unwrap();

        assert!(!session.select(Persona::Tenant));
        assert_eq!(session.engine().unwrap().fields().choice("budget"), Some("400_600"));

        assert!(session.select(Persona::Owner));
        let engine = session.engine().unwrap();
        assert_eq!(engine.persona(), Persona::Owner);
        assert!(!engine.is_dirty());
    }

    #[test]
    fn close_drops_the_engine() {
        let mut session = session();
        session.select(Persona::Owner);
        session
            .engine_mut()
            .unwrap()
            .set_field("city", Answer::text("Napoli"))
            .unwrap();
        assert!(session.close());
        assert!(session.engine().is_none());
        assert!(!session.close());

        session.select(Persona::Owner);
        assert!(!session.engine().unwrap().is_dirty());
    }

    #[test]
    fn share_needs_a_submitted_questionnaire() {
        let clipboard = crate::share::MemoryClipboard::new();
        let mut session = session();
        assert_eq!(session.share(&clipboard).unwrap_err(), ShareError::NoPersona);

        session.select(Persona::Tenant);
        assert_eq!(
            session.share(&clipboard).unwrap_err(),
            ShareError::NotSubmitted {
                persona: Persona::Tenant
            }
        );
        assert_eq!(clipboard.contents(), None);
    }
}
