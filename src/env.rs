//! Environment variable names read by [`crate::init::LoggerConfig::from_env`].
//!
//! These are purely helpers; [`crate::logger::Logger`] itself never reads the
//! environment.

/// Line format selector: `json` (default) or `text`.
pub const LOG_FORMAT_ENV: &str = "STRUCTLOG_FORMAT";

/// Most verbose level that still reaches the sink, e.g. `warn`.
pub const LOG_MAX_LEVEL_ENV: &str = "STRUCTLOG_MAX_LEVEL";

/// Whether records carry a `time` field: `true` (default) or `false`.
pub const LOG_INCLUDE_TIME_ENV: &str = "STRUCTLOG_INCLUDE_TIME";
