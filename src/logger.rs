use crate::dump::deep_dump;
use crate::init::LoggerConfig;
use crate::payload::encode_payload;
use crate::record::LogRecord;
use crate::sink::LineSink;
use crate::traced::TracedError;
use chrono::Utc;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::Level;

/// Writes structured error records to a [`LineSink`].
///
/// A `Logger` is an explicit value: build one from a sink and a
/// [`LoggerConfig`] and pass it to whatever needs to log. Clones share the
/// sink. Every record is composed without touching shared state and then
/// handed to the sink as one line.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LineSink>,
    config: LoggerConfig,
}

impl Logger {
    pub fn new(sink: Arc<dyn LineSink>, config: LoggerConfig) -> Self {
        Self { sink, config }
    }

    /// Logger with [`LoggerConfig::default`].
    pub fn with_defaults(sink: Arc<dyn LineSink>) -> Self {
        Self::new(sink, LoggerConfig::default())
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Log `message` at `ERROR` with the error's trace and the payload
    /// attached. Appends exactly one line to the sink.
    ///
    /// If the payload cannot be binary-encoded the failure is reported as a
    /// diagnostic and the record is still written, with an empty
    /// `thingEncoded`.
    pub fn emit<T>(&self, message: &str, error: &TracedError, payload: &T)
    where
        T: Serialize + Debug + ?Sized,
    {
        self.emit_at(Level::ERROR, message, error, payload);
    }

    /// Like [`Logger::emit`] with an explicit level. Records more verbose
    /// than `max_level` are dropped.
    pub fn emit_at<T>(&self, level: Level, message: &str, error: &TracedError, payload: &T)
    where
        T: Serialize + Debug + ?Sized,
    {
        if level > self.config.max_level {
            return;
        }
        let record = self.compose(level, message, error, payload);
        self.write(&record);
    }

    /// Build the record for one emission without writing it.
    pub fn compose<T>(&self, level: Level, message: &str, error: &TracedError, payload: &T) -> LogRecord
    where
        T: Serialize + Debug + ?Sized,
    {
        let payload_encoded = match encode_payload(payload) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "error while encoding payload");
                String::new()
            }
        };

        LogRecord {
            time: self.config.include_time.then(Utc::now),
            level: level.to_string(),
            message: message.to_string(),
            error_text: error.to_string(),
            stack_trace: error.stack_trace(),
            payload_debug_text: deep_dump(payload),
            payload_encoded,
        }
    }

    /// Render `record` with the configured format and append it.
    pub fn write(&self, record: &LogRecord) {
        let line = match self.config.format.render(record) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "error while rendering log record");
                return;
            }
        };

        if let Err(e) = self.sink.append(&line) {
            tracing::error!(error = %e, "log sink append failed");
        }
    }

    pub fn flush(&self) {
        if let Err(e) = self.sink.flush() {
            tracing::error!(error = %e, "log sink flush failed");
        }
    }
}
