use std::error::Error;

/// Destination for rendered log lines produced by [`crate::logger::Logger`].
///
/// Implementations must append each line as one unit: when several threads
/// share a sink, lines may land in any order but never interleave.
pub trait LineSink: Send + Sync {
    /// Append a single line. `line` does not carry a trailing newline; the
    /// sink adds its own separator.
    ///
    /// **Returns**
    /// - `Ok(())` if the line was accepted.
    /// - `Err(..)` if the underlying target rejected it. The logger reports
    ///   this as a diagnostic and does not retry.
    fn append(&self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered lines. Default implementation is a no-op.
    fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
