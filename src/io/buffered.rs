//! Line reconstruction over sources that only support bounded byte reads.
//!
//! `BufferedLineReader` amortizes many small line reads into chunked source
//! reads of `2 * buffer_unit` bytes. Callers must size `buffer_unit` to at
//! least the longest line they expect: an undersized unit stays correct but
//! forces repeated re-buffering of the unconsumed remainder on every refill,
//! which is exactly the cost the reader exists to avoid. For sources with a
//! native line primitive (local files), `buffer_unit == 0` callers should use
//! [`open_file_lines`](super::open_file_lines) instead, which bypasses this
//! reader entirely.

use std::io;
use std::mem;

use memchr::memchr;

use super::{ByteSource, LineSource, SourceError, SourceResult};

pub struct BufferedLineReader<S> {
    source: S,
    buffer_unit: usize,
    pending: Vec<u8>,
    cursor: usize,
}

impl<S: ByteSource> BufferedLineReader<S> {
    /// `buffer_unit` must be positive and no smaller than the longest
    /// expected line.
    pub fn new(source: S, buffer_unit: usize) -> Self {
        Self {
            source,
            buffer_unit,
            pending: Vec::new(),
            cursor: 0,
        }
    }

    /// Next line including its terminator, or `Ok(None)` once the source is
    /// exhausted. The final line of the stream may lack a terminator.
    pub fn read_line(&mut self) -> SourceResult<Option<String>> {
        loop {
            if let Some(at) = memchr(b'\n', &self.pending[self.cursor..]) {
                let end = self.cursor + at + 1;
                let line = self.pending[self.cursor..end].to_vec();
                self.cursor = end;
                return Ok(Some(into_text(line)?));
            }
            // No terminator in the retained window: compact and refill.
            self.pending.drain(..self.cursor);
            self.cursor = 0;
            let chunk = self.source.read(2 * self.buffer_unit)?;
            if chunk.is_empty() {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                let last = mem::take(&mut self.pending);
                return Ok(Some(into_text(last)?));
            }
            self.pending.extend_from_slice(&chunk);
        }
    }
}

impl<S: ByteSource> LineSource for BufferedLineReader<S> {
    fn next_line(&mut self) -> SourceResult<Option<String>> {
        self.read_line()
    }

    fn close(&mut self) -> SourceResult<()> {
        self.source.close()
    }
}

fn into_text(bytes: Vec<u8>) -> SourceResult<String> {
    String::from_utf8(bytes)
        .map_err(|err| SourceError::Read(io::Error::new(io::ErrorKind::InvalidData, err)))
}
