use crate::sink::LineSink;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Mutex;

/// Sink over any [`io::Write`] target, e.g. stdout or a `Vec<u8>`.
///
/// Each line is written with a single `write_all` while the writer lock is
/// held.
#[derive(Debug)]
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Give back the wrapped writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LineSink for WriterSink<W> {
    fn append(&self, line: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| "writer sink lock poisoned")?;
        writer.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| "writer sink lock poisoned")?;
        writer.flush()?;
        Ok(())
    }
}
