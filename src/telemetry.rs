//! Tracing subscriber setup.

use crate::config::ConfigError;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber filtered by `filter`.
///
/// # Errors
///
/// `LogFilter` for an unparseable directive, `Telemetry` if a global
/// subscriber is already installed.
pub fn init_tracing(filter: &str) -> Result<(), ConfigError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| ConfigError::LogFilter {
        filter: filter.to_string(),
        message: e.to_string(),
    })?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|e| ConfigError::Telemetry(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_is_reported() {
        let err = init_tracing("carpool=shouty").unwrap_err();
        assert!(matches!(err, ConfigError::LogFilter { .. }));
    }
}
