use crate::error::{CodecError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A structured error entry, as written to and read back from one log line.
///
/// Field names on the wire are short, machine-readable keys (`msg`, `err`,
/// `stack`, `thing`, `thingEncoded`). `time` and `level` are optional when
/// reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub level: String,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "err")]
    pub error_text: String,
    #[serde(rename = "stack")]
    pub stack_trace: String,
    /// Deep dump of the payload, for humans.
    #[serde(rename = "thing")]
    pub payload_debug_text: String,
    /// Base64 of the binary payload; empty if the payload failed to serialize.
    #[serde(rename = "thingEncoded")]
    pub payload_encoded: String,
}

impl LogRecord {
    pub fn has_payload(&self) -> bool {
        !self.payload_encoded.is_empty()
    }

    /// Rebuild the payload carried by this record.
    ///
    /// See [`crate::payload::decode_payload`] for the failure modes.
    pub fn decode_payload<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        crate::payload::decode_payload(&self.payload_encoded)
    }
}

/// Parse a single JSON log line into a [`LogRecord`].
///
/// **Errors**
/// - [`CodecError::Parse`] if the line is not JSON, or any of the five
///   record fields is missing or not a string.
pub fn parse_record(line: &str) -> Result<LogRecord> {
    serde_json::from_str(line.trim_end()).map_err(CodecError::Parse)
}

/// Parse every non-blank line of `buffer`, stopping at the first bad one.
pub fn parse_records(buffer: &str) -> Result<Vec<LogRecord>> {
    buffer
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_record)
        .collect()
}
