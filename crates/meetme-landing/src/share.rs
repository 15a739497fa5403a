//! Post-submission share action.
//!
//! After the thank-you screen the visitor can pass the page on. The message
//! never touches questionnaire answers; it only carries the persona's
//! invitation and the configured page URL.

use std::fmt;
use std::sync::{Arc, Mutex};

use meetme_core::Persona;
use serde::Serialize;

use crate::config::LandingConfig;
use crate::error::ShareError;

/// Toast shown once the link is on the clipboard.
pub const COPIED_NOTICE: &str = "Link copiato!";

/// What gets shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareMessage {
    pub persona: Persona,
    /// Persona-specific invitation copy.
    pub invitation: &'static str,
    /// Page URL; this is what a clipboard receives.
    pub url: String,
}

impl ShareMessage {
    #[must_use]
    pub fn for_persona(persona: Persona, config: &LandingConfig) -> Self {
        let invitation = match persona {
            Persona::Owner => "Condividi questa pagina con altri proprietari!",
            Persona::Tenant => "Condividi questa pagina con altri coinquilini!",
        };
        Self {
            persona,
            invitation,
            url: config.share_url.clone(),
        }
    }
}

impl fmt::Display for ShareMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.invitation, self.url)
    }
}

/// A clipboard or platform share target.
pub trait ShareChannel {
    /// The channel's name (for error reporting).
    fn name(&self) -> &str;

    /// Hand the message over.
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Channel`] if the target refused the message.
    fn share(&self, message: &ShareMessage) -> Result<(), ShareError>;
}

/// In-process clipboard. Copies the page URL, like a browser share button.
///
/// Clones share the same contents.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last copied text, if any.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl ShareChannel for MemoryClipboard {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "clipboard"
    }

    fn share(&self, message: &ShareMessage) -> Result<(), ShareError> {
        let mut contents = self.contents.lock().map_err(|e| ShareError::Channel {
            channel: self.name().to_owned(),
            reason: format!("clipboard lock poisoned: {e}"),
        })?;
        *contents = Some(message.url.clone());
        Ok(())
    }
}
