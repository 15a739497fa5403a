//! Landing configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `MEETME_*` environment variables.

/// Default page URL offered by the share action.
pub const DEFAULT_SHARE_URL: &str = "http://localhost:5173/";

/// Landing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingConfig {
    /// Page URL included in share messages.
    pub share_url: String,
    /// Log level filter (e.g., `info`, `debug`, `meetme=trace`).
    pub log_level: String,
    /// Whether logs are emitted as JSON lines.
    pub log_json: bool,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            share_url: DEFAULT_SHARE_URL.to_owned(),
            log_level: "info".to_owned(),
            log_json: true,
        }
    }
}

impl LandingConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MEETME_SHARE_URL`: page URL for the share action (default: `http://localhost:5173/`)
    /// - `MEETME_LOG_LEVEL`: log filter (default: `info`)
    /// - `MEETME_LOG_JSON`: JSON log output; `false` or `0` disables (default: `true`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup, e.g. a fixed map in tests.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let share_url = lookup("MEETME_SHARE_URL")
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.share_url);

        let log_level = lookup("MEETME_LOG_LEVEL")
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(defaults.log_level);

        let log_json = lookup("MEETME_LOG_JSON")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(defaults.log_json);

        Self {
            share_url,
            log_level,
            log_json,
        }
    }
}
