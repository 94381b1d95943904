mod engine;
mod export;
mod fasta;
mod filter;
mod results;
mod sequence;
#[cfg(test)]
mod tests;

pub use engine::{AlignmentEngine, BlastOptions, BlastOutcome, Blaster, Program};
pub use export::{ExportError, render_csv_sequences, write_parquet_sequences};
pub use fasta::RecordStream;
pub use filter::{LogObserver, PullObserver, ThroughputFilter};
pub use results::BlastResultStream;
pub use sequence::{FastaFactory, SeqStream, Sequence, SequenceFactory, Strand};
