use std::cell::Cell;
use std::rc::Rc;

use crate::blast::{AlignmentEngine, BlastOptions, RecordStream, Sequence};
use crate::io::{BufferedLineReader, ByteSource, LineSource, SourceError, SourceResult};

/// In-memory byte source that counts successful closes.
pub(super) struct MemorySource {
    data: Vec<u8>,
    pos: usize,
    open: bool,
    closes: Rc<Cell<u32>>,
}

impl MemorySource {
    pub(super) fn new(data: &[u8]) -> (Self, Rc<Cell<u32>>) {
        let closes = Rc::new(Cell::new(0));
        let source = Self {
            data: data.to_vec(),
            pos: 0,
            open: true,
            closes: closes.clone(),
        };
        (source, closes)
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, max_bytes: usize) -> SourceResult<Vec<u8>> {
        if !self.open {
            return Err(SourceError::Closed);
        }
        let end = (self.pos + max_bytes).min(self.data.len());
        let chunk = self.data[self.pos..end].to_vec();
        self.pos = end;
        Ok(chunk)
    }

    fn close(&mut self) -> SourceResult<()> {
        if !self.open {
            return Err(SourceError::Closed);
        }
        self.open = false;
        self.closes.set(self.closes.get() + 1);
        Ok(())
    }
}

/// Line source backed by a fixed script of lines.
pub(super) struct VecLines {
    lines: std::vec::IntoIter<String>,
    open: bool,
}

impl VecLines {
    pub(super) fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .into_iter(),
            open: true,
        }
    }
}

impl LineSource for VecLines {
    fn next_line(&mut self) -> SourceResult<Option<String>> {
        if !self.open {
            return Err(SourceError::Closed);
        }
        Ok(self.lines.next())
    }

    fn close(&mut self) -> SourceResult<()> {
        if !self.open {
            return Err(SourceError::Closed);
        }
        self.open = false;
        Ok(())
    }
}

/// Stub engine: the report is the subject's residue count. Tracks how many
/// times the query context was prepared.
pub(super) struct LengthEngine {
    pub(super) prepared: Rc<Cell<u32>>,
}

impl LengthEngine {
    pub(super) fn new() -> (Self, Rc<Cell<u32>>) {
        let prepared = Rc::new(Cell::new(0));
        (
            Self {
                prepared: prepared.clone(),
            },
            prepared,
        )
    }
}

impl AlignmentEngine for LengthEngine {
    type Report = usize;

    fn prepare(&mut self, _query: &Sequence, _options: &BlastOptions) {
        self.prepared.set(self.prepared.get() + 1);
    }

    fn align(&mut self, subject: &Sequence) -> usize {
        subject.len()
    }
}

pub(super) fn records_from_bytes(
    data: &[u8],
    buffer_unit: usize,
) -> RecordStream<BufferedLineReader<MemorySource>> {
    let (source, _closes) = MemorySource::new(data);
    RecordStream::new(BufferedLineReader::new(source, buffer_unit))
}

pub(super) fn collect_records(data: &[u8], buffer_unit: usize) -> Vec<String> {
    records_from_bytes(data, buffer_unit)
        .map(|record| record.unwrap())
        .collect()
}
