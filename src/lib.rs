pub mod error;
pub mod record;
pub mod payload;
pub mod dump;
pub mod traced;
pub mod format;
pub mod sink;
pub mod logger;

pub mod init;
pub mod env;
pub mod memory_sink;
pub mod writer_sink;
pub mod noop_sink;

pub use error::{CodecError, Result};
pub use logger::Logger;
pub use record::{parse_record, parse_records, LogRecord};
pub use traced::TracedError;
