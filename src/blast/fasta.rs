use crate::io::{LineSource, SourceResult};

/// Reassembles marker-delimited multi-line records from a line source.
///
/// A line starting with `>` closes the record accumulated so far and opens
/// the next one; content before the first marker forms a leading record and
/// a non-empty accumulation at end-of-stream forms the trailing one. The
/// stream owns its line source and closes it when dropped.
pub struct RecordStream<L: LineSource> {
    lines: L,
    pending: Vec<String>,
    done: bool,
}

impl<L: LineSource> RecordStream<L> {
    pub fn new(lines: L) -> Self {
        Self {
            lines,
            pending: Vec::new(),
            done: false,
        }
    }

    fn flush(&mut self) -> String {
        // Lines keep their terminators, so no separator is inserted.
        let record = self.pending.concat();
        self.pending.clear();
        record
    }
}

impl<L: LineSource> Iterator for RecordStream<L> {
    type Item = SourceResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.lines.next_line() {
                Err(err) => return Some(Err(err)),
                Ok(Some(line)) => {
                    if line.starts_with('>') && !self.pending.is_empty() {
                        let record = self.flush();
                        self.pending.push(line);
                        return Some(Ok(record));
                    }
                    self.pending.push(line);
                }
                Ok(None) => {
                    self.done = true;
                    if self.pending.is_empty() {
                        return None;
                    }
                    return Some(Ok(self.flush()));
                }
            }
        }
    }
}

impl<L: LineSource> Drop for RecordStream<L> {
    fn drop(&mut self) {
        let _ = self.lines.close();
    }
}
