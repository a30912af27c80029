use crate::env::{LOG_FORMAT_ENV, LOG_INCLUDE_TIME_ENV, LOG_MAX_LEVEL_ENV};
use crate::format::LineFormat;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Options for a [`crate::logger::Logger`].
///
/// **Fields**
/// - `format`: how records are laid out on their line.
/// - `max_level`: most verbose level that is still written; records above
///   it are dropped before anything is composed.
/// - `include_time`: whether records carry a `time` field. Turning it off
///   makes identical emissions produce byte-identical lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    pub format: LineFormat,
    pub max_level: Level,
    pub include_time: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LineFormat::Json,
            max_level: Level::TRACE,
            include_time: true,
        }
    }
}

impl LoggerConfig {
    /// Build a config from the process environment. See [`crate::env`] for
    /// the variable names.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Unset keys keep their default. Values that fail to parse also keep
    /// the default and are reported with a `warn` diagnostic.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            match raw.parse::<LineFormat>() {
                Ok(format) => config.format = format,
                Err(e) => tracing::warn!(key = LOG_FORMAT_ENV, error = %e, "ignoring invalid setting"),
            }
        }

        if let Some(raw) = lookup(LOG_MAX_LEVEL_ENV) {
            match raw.trim().parse::<Level>() {
                Ok(level) => config.max_level = level,
                Err(e) => tracing::warn!(key = LOG_MAX_LEVEL_ENV, error = %e, "ignoring invalid setting"),
            }
        }

        if let Some(raw) = lookup(LOG_INCLUDE_TIME_ENV) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.include_time = true,
                "0" | "false" | "no" | "off" => config.include_time = false,
                other => tracing::warn!(key = LOG_INCLUDE_TIME_ENV, value = other, "ignoring invalid setting"),
            }
        }

        config
    }
}

/// Install a stderr `fmt` subscriber for the crate's own diagnostics
/// (payload encoding failures, sink errors, bad settings).
///
/// Filtering follows `RUST_LOG`. If a global subscriber is already set this
/// is a no-op.
pub fn init_diagnostics() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
