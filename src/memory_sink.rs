use crate::sink::LineSink;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// In-memory, newline-separated log buffer.
///
/// Clones share the same buffer, so a test can hand one clone to a
/// [`crate::logger::Logger`] and read lines back through another.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, each line terminated by `\n`.
    pub fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        match self.buffer.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl LineSink for MemorySink {
    fn append(&self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| "memory sink lock poisoned")?;
        buffer.push_str(line);
        buffer.push('\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let sink = MemorySink::new();
        let reader = sink.clone();
        sink.append("first").unwrap();
        sink.append("second").unwrap();
        assert_eq!(reader.contents(), "first\nsecond\n");
        assert_eq!(reader.lines(), vec!["first", "second"]);
    }

    #[test]
    fn clear_empties_buffer() {
        let sink = MemorySink::new();
        sink.append("line").unwrap();
        sink.clear();
        assert!(sink.contents().is_empty());
    }
}
