use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::{self, Write as _};
use std::panic::Location;

/// Error value that remembers where it was raised.
///
/// The caller location and a full backtrace are captured when the value is
/// created. Frames are symbolized lazily, the first time
/// [`TracedError::stack_trace`] renders them.
#[derive(Debug)]
pub struct TracedError {
    description: String,
    location: &'static Location<'static>,
    backtrace: Backtrace,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl TracedError {
    /// Create a new error with a short description, capturing the call
    /// chain at this point.
    #[track_caller]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            location: Location::caller(),
            backtrace: Backtrace::force_capture(),
            source: None,
        }
    }

    /// Attach a stack to an existing error. The wrapped error becomes the
    /// [`Error::source`] and its message becomes the description.
    #[track_caller]
    pub fn with_stack<E>(source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            description: source.to_string(),
            location: Location::caller(),
            backtrace: Backtrace::force_capture(),
            source: Some(Box::new(source)),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Source location of the code that created this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Multi-line trace: description, origin, then the captured frames.
    pub fn stack_trace(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.description);
        let _ = writeln!(
            out,
            "    at {}:{}:{}",
            self.location.file(),
            self.location.line(),
            self.location.column()
        );
        let _ = write!(out, "{}", self.backtrace);
        out
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}
