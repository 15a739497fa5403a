//! Splash-page segment chooser.

use std::fmt;

use meetme_core::Persona;
use serde::Serialize;

/// Which view the landing page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentSelection {
    /// The splash chooser.
    #[default]
    None,
    Owner,
    Tenant,
}

impl SegmentSelection {
    #[must_use]
    pub fn persona(self) -> Option<Persona> {
        match self {
            Self::None => None,
            Self::Owner => Some(Persona::Owner),
            Self::Tenant => Some(Persona::Tenant),
        }
    }
}

impl From<Persona> for SegmentSelection {
    fn from(persona: Persona) -> Self {
        match persona {
            Persona::Owner => Self::Owner,
            Persona::Tenant => Self::Tenant,
        }
    }
}

impl fmt::Display for SegmentSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.persona() {
            Some(persona) => fmt::Display::fmt(&persona, f),
            None => f.write_str("none"),
        }
    }
}

/// Holds the current segment. Never fails, never persists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentRouter {
    selection: SegmentSelection,
}

impl SegmentRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selection(&self) -> SegmentSelection {
        self.selection
    }

    #[must_use]
    pub fn persona(&self) -> Option<Persona> {
        self.selection.persona()
    }

    /// Open `persona`'s questionnaire, switching if another is open.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, persona: Persona) -> bool {
        let next = SegmentSelection::from(persona);
        let changed = self.selection != next;
        self.selection = next;
        changed
    }

    /// Back to the splash chooser. Returns whether a questionnaire was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.selection != SegmentSelection::None;
        self.selection = SegmentSelection::None;
        was_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_close() {
        let mut router = SegmentRouter::new();
        assert_eq!(router.selection(), SegmentSelection::None);

        assert!(router.select(Persona::Tenant));
        assert_eq!(router.persona(), Some(Persona::Tenant));
        assert!(!router.select(Persona::Tenant));

        assert!(router.select(Persona::Owner));
        assert_eq!(router.selection(), SegmentSelection::Owner);

        assert!(router.close());
        assert!(!router.close());
        assert_eq!(router.persona(), None);
    }

    #[test]
    fn selection_displays_lowercase() {
        assert_eq!(SegmentSelection::None.to_string(), "none");
        assert_eq!(SegmentSelection::Owner.to_string(), "owner");
    }
}
