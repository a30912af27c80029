use crate::error::{CodecError, Result};
use crate::record::LogRecord;
use std::fmt::Write as _;
use std::str::FromStr;

/// How a [`LogRecord`] is laid out on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// One JSON object per line. This is the only format
    /// [`crate::record::parse_record`] reads back.
    #[default]
    Json,
    /// `key=value` pairs with quoted, escaped values. For terminals.
    Text,
}

impl LineFormat {
    /// Render `record` as a single line, without the trailing newline.
    pub fn render(self, record: &LogRecord) -> Result<String> {
        match self {
            LineFormat::Json => serde_json::to_string(record).map_err(CodecError::Render),
            LineFormat::Text => Ok(render_text(record)),
        }
    }
}

fn render_text(record: &LogRecord) -> String {
    let mut out = String::new();
    if let Some(time) = &record.time {
        let _ = write!(out, "time={} ", time.to_rfc3339());
    }
    if !record.level.is_empty() {
        let _ = write!(out, "level={} ", record.level);
    }
    // Debug formatting escapes newlines, keeping the entry on one line.
    let _ = write!(
        out,
        "msg={:?} err={:?} stack={:?} thing={:?} thingEncoded={:?}",
        record.message,
        record.error_text,
        record.stack_trace,
        record.payload_debug_text,
        record.payload_encoded
    );
    out
}

/// Error returned when a format selector string is not recognized.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown log line format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for LineFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LineFormat::Json),
            "text" | "logfmt" => Ok(LineFormat::Text),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LogRecord {
        LogRecord {
            time: None,
            level: "ERROR".to_string(),
            message: "boom".to_string(),
            error_text: "bad".to_string(),
            stack_trace: "bad\n    at here\n".to_string(),
            payload_debug_text: "(T) T {\n    x: 1,\n}\n".to_string(),
            payload_encoded: "oWF4AQ==".to_string(),
        }
    }

    #[test]
    fn json_line_is_single_line_and_parses_back() {
        let line = LineFormat::Json.render(&record()).unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(crate::record::parse_record(&line).unwrap(), record());
    }

    #[test]
    fn text_line_is_single_line() {
        let line = LineFormat::Text.render(&record()).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.starts_with("level=ERROR msg=\"boom\" err=\"bad\""));
        assert!(line.contains("thingEncoded=\"oWF4AQ==\""));
    }

    #[test]
    fn parses_selector_names() {
        assert_eq!("JSON".parse::<LineFormat>(), Ok(LineFormat::Json));
        assert_eq!(" text ".parse::<LineFormat>(), Ok(LineFormat::Text));
        assert_eq!("logfmt".parse::<LineFormat>(), Ok(LineFormat::Text));
        assert_eq!(
            "xml".parse::<LineFormat>(),
            Err(UnknownFormat("xml".to_string()))
        );
    }
}
