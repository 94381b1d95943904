pub mod blast;
pub mod io;

pub use blast::{
    AlignmentEngine, BlastOptions, BlastOutcome, BlastResultStream, Blaster, FastaFactory,
    Program, RecordStream, SeqStream, Sequence, SequenceFactory, Strand, ThroughputFilter,
};
pub use io::{
    BufferedLineReader, ByteSource, FileLines, FileSource, LineSource, RemoteConfig,
    RemoteSource, SourceError, SourceResult, open_file_lines,
};
