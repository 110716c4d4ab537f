//! Logging subscriber initialisation.

use clap::ValueEnum;
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::ParseError,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    /// The configured log level is not a valid filter directive.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber was already installed.
    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Log output format.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,

    /// Newline-delimited JSON.
    Json,
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// Returns an error if `log_level` is not a valid directive or a subscriber is already installed.
pub fn init_subscriber(log_level: &str, log_format: LogFormat) -> Result<(), ObservabilityError> {
    let filter = build_env_filter(log_level)?;

    match log_format {
        LogFormat::Compact => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(std::io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            filter,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(std::io::stderr),
        ),
    }
}

fn build_env_filter(log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    env_filter(rust_log.as_deref(), log_level)
}

/// A valid `rust_log` wins; otherwise `log_level` must parse.
fn env_filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter, ObservabilityError> {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .map_or_else(|| EnvFilter::try_new(log_level), Ok)
        .map_err(ObservabilityError::from)
}

fn init_with_layer<L>(filter: EnvFilter, fmt_layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn env_filter_uses_log_level_without_rust_log() -> TestResult {
        let filter = env_filter(None, "debug")?;

        assert_eq!(filter.to_string(), "debug");

        Ok(())
    }

    #[test]
    fn env_filter_prefers_rust_log() -> TestResult {
        let filter = env_filter(Some("tally=trace"), "info")?;

        assert_eq!(filter.to_string(), "tally=trace");

        Ok(())
    }

    #[test]
    fn env_filter_falls_back_when_rust_log_is_invalid() -> TestResult {
        let filter = env_filter(Some("tally=verbose"), "warn")?;

        assert_eq!(filter.to_string(), "warn");

        Ok(())
    }

    #[test]
    fn env_filter_rejects_invalid_log_level() {
        let result = env_filter(None, "tally=verbose");

        assert!(matches!(result, Err(ObservabilityError::Filter(_))));
    }

    #[test]
    fn init_subscriber_installs_once() {
        assert!(init_subscriber("info", LogFormat::Json).is_ok());

        let second = init_subscriber("info", LogFormat::Compact);

        assert!(matches!(second, Err(ObservabilityError::Init(_))));
    }

    #[test]
    fn log_format_defaults_to_compact() {
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }

    #[test]
    fn log_format_parses_from_str() {
        assert_eq!(LogFormat::from_str("json", true), Ok(LogFormat::Json));
    }
}
