mod buffered;
mod file;
mod remote;

pub use buffered::BufferedLineReader;
pub use file::{FileLines, FileSource, NativeLineReader, open_file_lines};
pub use remote::{RemoteConfig, RemoteSource};

use std::fmt;
use std::io;

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug)]
pub enum SourceError {
    /// Operation on a source that was already closed.
    Closed,
    /// Remote handshake failed at construction time.
    Connection(String),
    /// Transport-level read failure.
    Read(io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Closed => write!(f, "source already closed"),
            SourceError::Connection(msg) => write!(f, "connection failed: {msg}"),
            SourceError::Read(err) => write!(f, "read failed: {err}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Read(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SourceError {
    fn from(err: io::Error) -> Self {
        SourceError::Read(err)
    }
}

/// A handle supporting bounded reads and a single close.
///
/// `read` returns up to `max_bytes` bytes, fewer near the end of the stream,
/// and an empty chunk once the stream is exhausted. Exhaustion is never an
/// error. Every operation on a closed source reports `SourceError::Closed`,
/// including a second `close`.
pub trait ByteSource {
    fn read(&mut self, max_bytes: usize) -> SourceResult<Vec<u8>>;
    fn close(&mut self) -> SourceResult<()>;
}

/// A pull-based producer of text lines.
///
/// Lines keep their trailing `\n` except possibly the final line of the
/// stream. `Ok(None)` marks end-of-stream and repeats on every later pull.
pub trait LineSource {
    fn next_line(&mut self) -> SourceResult<Option<String>>;
    fn close(&mut self) -> SourceResult<()>;
}
