//! Meet me landing session.
//!
//! Wires the questionnaire engine from `meetme-core` into a landing page
//! session: the owner/tenant segment router, the mounted questionnaire, the
//! post-submission share action, plus configuration and logging setup.

pub mod config;
pub mod error;
pub mod router;
pub mod session;
pub mod share;
pub mod telemetry;

pub use config::LandingConfig;
pub use error::{ShareError, TelemetryError};
pub use router::{SegmentRouter, SegmentSelection};
pub use session::LandingSession;
pub use share::{MemoryClipboard, ShareChannel, ShareMessage};
