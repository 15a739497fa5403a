//! Structured logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::LandingConfig;
use crate::error::TelemetryError;

/// Build the log filter: `RUST_LOG` wins, then the configured level.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] if neither `RUST_LOG` nor the
/// configured level parses as a filter directive.
pub fn env_filter(config: &LandingConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::InvalidFilter {
            filter: config.log_level.clone(),
            reason: e.to_string(),
        })
    })
}

/// Install the global `fmt` subscriber, JSON or human-readable per config.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LandingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| TelemetryError::AlreadyInstalled {
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_builds_a_filter() {
        let config = LandingConfig {
            log_level: "meetme_core=debug,info".to_owned(),
            ..LandingConfig::default()
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn second_install_is_reported() {
        let config = LandingConfig::default();
        // Another test binary thread may have installed one first.
        let _ = init_tracing(&config);
        let err = init_tracing(&config).unwrap_err();
        assert!(matches!(err, TelemetryError::AlreadyInstalled { .. }));
    }
}
