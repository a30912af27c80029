use crate::sink::LineSink;
use std::error::Error;

/// A sink that simply drops all lines.
///
/// Useful for measuring the cost of composing records (dump, payload
/// encoding, stack rendering) without any output.
#[derive(Clone, Debug, Default)]
pub struct NoopSink;

impl LineSink for NoopSink {
    fn append(&self, _line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
