use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use super::{BufferedLineReader, ByteSource, LineSource, SourceError, SourceResult};

enum FileHandle {
    Plain(File),
    Gzip(MultiGzDecoder<File>),
}

/// Local filesystem byte source. Paths ending in `.gz` are transparently
/// decompressed.
pub struct FileSource {
    handle: Option<FileHandle>,
}

impl FileSource {
    pub fn open(path: &Path) -> SourceResult<Self> {
        let file = File::open(path).map_err(SourceError::Read)?;
        let handle = if is_gzip_path(path) {
            FileHandle::Gzip(MultiGzDecoder::new(file))
        } else {
            FileHandle::Plain(file)
        };
        Ok(Self {
            handle: Some(handle),
        })
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, max_bytes: usize) -> SourceResult<Vec<u8>> {
        let handle = self.handle.as_mut().ok_or(SourceError::Closed)?;
        let mut chunk = vec![0u8; max_bytes];
        let filled = match handle {
            FileHandle::Plain(file) => file.read(&mut chunk),
            FileHandle::Gzip(decoder) => decoder.read(&mut chunk),
        }
        .map_err(SourceError::Read)?;
        chunk.truncate(filled);
        Ok(chunk)
    }

    fn close(&mut self) -> SourceResult<()> {
        match self.handle.take() {
            Some(_) => Ok(()),
            None => Err(SourceError::Closed),
        }
    }
}

/// Delegate to the platform buffered line primitive. Used when buffering is
/// disabled (`buffer_unit == 0`), which is only meaningful for local files.
pub struct NativeLineReader {
    reader: Option<Box<dyn BufRead>>,
}

impl NativeLineReader {
    pub fn new(reader: Box<dyn BufRead>) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl LineSource for NativeLineReader {
    fn next_line(&mut self) -> SourceResult<Option<String>> {
        let reader = self.reader.as_mut().ok_or(SourceError::Closed)?;
        let mut line = String::new();
        let read = reader.read_line(&mut line).map_err(SourceError::Read)?;
        if read == 0 { Ok(None) } else { Ok(Some(line)) }
    }

    fn close(&mut self) -> SourceResult<()> {
        match self.reader.take() {
            Some(_) => Ok(()),
            None => Err(SourceError::Closed),
        }
    }
}

pub enum FileLines {
    Native(NativeLineReader),
    Buffered(BufferedLineReader<FileSource>),
}

impl LineSource for FileLines {
    fn next_line(&mut self) -> SourceResult<Option<String>> {
        match self {
            FileLines::Native(reader) => reader.next_line(),
            FileLines::Buffered(reader) => reader.next_line(),
        }
    }

    fn close(&mut self) -> SourceResult<()> {
        match self {
            FileLines::Native(reader) => reader.close(),
            FileLines::Buffered(reader) => reader.close(),
        }
    }
}

/// Open a local file as a line source. `buffer_unit == 0` selects the native
/// line primitive; any positive value reads through `BufferedLineReader` in
/// chunks of `2 * buffer_unit` bytes.
pub fn open_file_lines(path: &Path, buffer_unit: usize) -> SourceResult<FileLines> {
    if buffer_unit == 0 {
        let file = File::open(path).map_err(SourceError::Read)?;
        let reader: Box<dyn BufRead> = if is_gzip_path(path) {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(FileLines::Native(NativeLineReader::new(reader)))
    } else {
        let source = FileSource::open(path)?;
        Ok(FileLines::Buffered(BufferedLineReader::new(
            source,
            buffer_unit,
        )))
    }
}

fn is_gzip_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
